//! Profile morphing engine.
//!
//! Owns the immutable reference geometry and two one-time baseline profiles
//! ("start" and "end"); every morph is a pure function of those baselines and
//! the requested blend factor.

use ndarray::Array1;

use dls_math::spline::{CordSpline, DEFAULT_SAMPLES};
use dls_types::config::OffsetSpec;
use dls_types::error::{DlsError, DlsResult};
use dls_types::state::{Profile, ReferenceGeometry};

use crate::reconstruct::populate_profile;
use crate::shift::shift_points;

#[derive(Debug, Clone)]
pub struct MorphEngine {
    geometry: ReferenceGeometry,
    start: Option<Profile>,
    end: Option<Profile>,
}

impl MorphEngine {
    pub fn new(geometry: ReferenceGeometry) -> Self {
        MorphEngine {
            geometry,
            start: None,
            end: None,
        }
    }

    pub fn geometry(&self) -> &ReferenceGeometry {
        &self.geometry
    }

    pub fn start(&self) -> Option<&Profile> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Profile> {
        self.end.as_ref()
    }

    /// Build control points and dense samples for an offset sequence against
    /// the reference leg spline.
    fn control_curve(
        &self,
        offsets: &[OffsetSpec],
    ) -> DlsResult<(Array1<f64>, Array1<f64>, Array1<f64>, Array1<f64>)> {
        let reference = CordSpline::fit(self.geometry.r_leg(), self.geometry.z_leg())?;
        let (x, y) = shift_points(&reference, offsets);
        let spline = CordSpline::fit(x.view(), y.view())?;
        let (xs, ys) = spline.sample(DEFAULT_SAMPLES);
        Ok((x, y, xs, ys))
    }

    /// Set the start baseline. The start profile carries the reference
    /// geometry's own arrays: it is the fixed shape every reconstruction
    /// resamples against. One-time operation.
    pub fn set_start(&mut self, offsets: &[OffsetSpec]) -> DlsResult<()> {
        if self.start.is_some() {
            return Err(DlsError::ConfigError(
                "start baseline already set".into(),
            ));
        }
        let (x, y, xs, ys) = self.control_curve(offsets)?;
        self.start = Some(Profile {
            x,
            y,
            xs,
            ys,
            r_leg: self.geometry.r_leg().to_owned(),
            z_leg: self.geometry.z_leg().to_owned(),
            r: self.geometry.r.clone(),
            z: self.geometry.z.clone(),
            btot: self.geometry.btot.clone(),
            bpol: self.geometry.bpol.clone(),
            s: self.geometry.s.clone(),
            spol: self.geometry.spol.clone(),
            xpoint: self.geometry.xpoint,
        });
        Ok(())
    }

    /// Set the end baseline and fully populate it against start. One-time
    /// operation; requires the start baseline.
    pub fn set_end(&mut self, offsets: &[OffsetSpec]) -> DlsResult<()> {
        if self.end.is_some() {
            return Err(DlsError::ConfigError("end baseline already set".into()));
        }
        let start = self
            .start
            .as_ref()
            .ok_or_else(|| DlsError::ConfigError("start baseline not set".into()))?;
        let (x, y, xs, ys) = self.control_curve(offsets)?;
        self.end = Some(populate_profile(start, x, y, xs, ys)?);
        Ok(())
    }

    /// Blend start and end control points at `factor` (0 = start, 1 = end;
    /// values outside [0, 1] extrapolate) and reconstruct the profile.
    pub fn morph(&self, factor: f64) -> DlsResult<Profile> {
        let start = self
            .start
            .as_ref()
            .ok_or_else(|| DlsError::ConfigError("start baseline not set".into()))?;
        let end = self
            .end
            .as_ref()
            .ok_or_else(|| DlsError::ConfigError("end baseline not set".into()))?;
        if start.x.len() != end.x.len() {
            return Err(DlsError::ShapeMismatch(format!(
                "start has {} control points, end has {}",
                start.x.len(),
                end.x.len()
            )));
        }

        let x = &start.x + factor * (&end.x - &start.x);
        let y = &start.y + factor * (&end.y - &start.y);
        let spline = CordSpline::fit(x.view(), y.view())?;
        let (xs, ys) = spline.sample(DEFAULT_SAMPLES);

        populate_profile(start, x, y, xs, ys)
    }

    /// Independent morphs for each factor, in input order.
    pub fn generate(&self, factors: &[f64]) -> DlsResult<Vec<(f64, Profile)>> {
        factors
            .iter()
            .map(|&f| self.morph(f).map(|p| (f, p)))
            .collect()
    }
}
