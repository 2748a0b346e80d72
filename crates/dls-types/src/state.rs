//! Field-line geometry state: the immutable reference geometry supplied by an
//! external equilibrium source, and the derived `Profile` records produced by
//! the morphing pipeline.
//!
//! Index convention: index 0 is the divertor target, index `xpoint` is the
//! X-point (last point of the leg), the tail beyond `xpoint` continues
//! upstream along the field line.

use ndarray::{s, Array1, ArrayView1};

use crate::error::{DlsError, DlsResult};

/// Reference field-line geometry along the full flux tube.
///
/// All arrays are parallel (same length, same index correspondence).
/// Validated once at construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceGeometry {
    /// Major radius R per point [m].
    pub r: Array1<f64>,
    /// Vertical coordinate Z per point [m].
    pub z: Array1<f64>,
    /// Total field magnitude per point [T].
    pub btot: Array1<f64>,
    /// Poloidal field magnitude per point [T].
    pub bpol: Array1<f64>,
    /// Total (field-line-following) arc length per point [m].
    pub s: Array1<f64>,
    /// Poloidal arc length per point [m].
    pub spol: Array1<f64>,
    /// Index of the X-point; the leg is the closed range `[0, xpoint]`.
    pub xpoint: usize,
}

impl ReferenceGeometry {
    pub fn new(
        r: Array1<f64>,
        z: Array1<f64>,
        btot: Array1<f64>,
        bpol: Array1<f64>,
        s: Array1<f64>,
        spol: Array1<f64>,
        xpoint: usize,
    ) -> DlsResult<Self> {
        let n = r.len();
        for (name, arr) in [
            ("Z", &z),
            ("Btot", &btot),
            ("Bpol", &bpol),
            ("S", &s),
            ("Spol", &spol),
        ] {
            if arr.len() != n {
                return Err(DlsError::ShapeMismatch(format!(
                    "{name} has {} points, R has {n}",
                    arr.len()
                )));
            }
        }
        if xpoint >= n {
            return Err(DlsError::ShapeMismatch(format!(
                "X-point index {xpoint} out of range for {n} points"
            )));
        }
        for i in 0..n {
            if bpol[i] < 0.0 {
                return Err(DlsError::PhysicsViolation(format!(
                    "Bpol[{i}] = {} is negative",
                    bpol[i]
                )));
            }
            if btot[i] < bpol[i] {
                return Err(DlsError::PhysicsViolation(format!(
                    "Btot[{i}] = {} < Bpol[{i}] = {}: toroidal component imaginary",
                    btot[i], bpol[i]
                )));
            }
        }

        Ok(ReferenceGeometry {
            r,
            z,
            btot,
            bpol,
            s,
            spol,
            xpoint,
        })
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// R along the leg only, target to X-point inclusive.
    pub fn r_leg(&self) -> ArrayView1<'_, f64> {
        self.r.slice(s![..=self.xpoint])
    }

    /// Z along the leg only, target to X-point inclusive.
    pub fn z_leg(&self) -> ArrayView1<'_, f64> {
        self.z.slice(s![..=self.xpoint])
    }
}

/// One morphed (or baseline) field-line configuration.
///
/// Plain data: consumers (plotting, diagnostics) read fields directly and
/// never mutate a profile owned by the engine.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Control point x coordinates (R) defining the leg shape.
    pub x: Array1<f64>,
    /// Control point y coordinates (Z).
    pub y: Array1<f64>,
    /// Dense spline samples of the control polygon, x component.
    pub xs: Array1<f64>,
    /// Dense spline samples, y component.
    pub ys: Array1<f64>,
    /// Reconstructed leg R, arc-length-matched to the start leg.
    pub r_leg: Array1<f64>,
    /// Reconstructed leg Z.
    pub z_leg: Array1<f64>,
    /// Full field line R: reconstructed leg + unchanged upstream tail.
    pub r: Array1<f64>,
    /// Full field line Z.
    pub z: Array1<f64>,
    /// Total field magnitude over the full line.
    pub btot: Array1<f64>,
    /// Poloidal field magnitude over the full line.
    pub bpol: Array1<f64>,
    /// Total arc length over the full line.
    pub s: Array1<f64>,
    /// Poloidal arc length over the full line.
    pub spol: Array1<f64>,
    /// X-point index, inherited from the start profile.
    pub xpoint: usize,
}

impl Profile {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}
