//! Leg reconstruction: rebuild a full field-line geometry and its field
//! quantities from a modified leg curve.
//!
//! The portion of the field line above the X-point is never touched; the new
//! leg is resampled onto the start leg's cord-length fractions so every
//! profile keeps the same point count and index correspondence. Poloidal
//! field is taken as geometry-invariant (a declared physical approximation),
//! while the toroidal component is rescaled by the 1/R law before
//! recombining the total field.

use ndarray::{concatenate, s, Array1, ArrayView1, Axis};

use dls_math::spline::{cord_distance, CordSpline};
use dls_types::error::{DlsError, DlsResult};
use dls_types::state::Profile;

/// Poloidal field magnitudes at or below this are treated as singular: the
/// field line is locally purely toroidal and the parallel arc length
/// diverges.
pub const BPOL_FLOOR: f64 = 1e-12;

/// Cumulative poloidal distance from the first point.
pub fn poloidal_lengths(r: ArrayView1<'_, f64>, z: ArrayView1<'_, f64>) -> Array1<f64> {
    let n = r.len();
    let mut ll = Array1::zeros(n);
    for i in 1..n {
        let dl = ((r[i] - r[i - 1]).powi(2) + (z[i] - z[i - 1]).powi(2)).sqrt();
        ll[i] = ll[i - 1] + dl;
    }
    ll
}

/// Cumulative field-line-following distance from the first point.
///
/// Each poloidal step is stretched by `|Btot| / |Bpol|`, the local field-line
/// pitch. A (near-)zero poloidal field anywhere along the line is surfaced
/// as [`DlsError::SingularField`] rather than a silent infinity.
pub fn parallel_lengths(
    r: ArrayView1<'_, f64>,
    z: ArrayView1<'_, f64>,
    btot: ArrayView1<'_, f64>,
    bpol: ArrayView1<'_, f64>,
) -> DlsResult<Array1<f64>> {
    let n = r.len();
    if z.len() != n || btot.len() != n || bpol.len() != n {
        return Err(DlsError::ShapeMismatch(format!(
            "parallel lengths: R {n}, Z {}, Btot {}, Bpol {}",
            z.len(),
            btot.len(),
            bpol.len()
        )));
    }

    let mut s = Array1::zeros(n);
    for i in 0..n {
        if bpol[i].abs() <= BPOL_FLOOR {
            return Err(DlsError::SingularField {
                index: i,
                bpol: bpol[i],
            });
        }
        if i == 0 {
            continue;
        }
        let dl = ((r[i] - r[i - 1]).powi(2) + (z[i] - z[i - 1]).powi(2)).sqrt();
        s[i] = s[i - 1] + dl * btot[i].abs() / bpol[i].abs();
    }
    Ok(s)
}

/// Populate a full profile from new-leg control points and dense samples,
/// reconstructing against the fixed start baseline.
///
/// `xs, ys` run from the X-point end toward the target (control-point
/// order); they are reversed here so the resampling spline runs in the same
/// direction as the start leg.
pub fn populate_profile(
    start: &Profile,
    x: Array1<f64>,
    y: Array1<f64>,
    xs: Array1<f64>,
    ys: Array1<f64>,
) -> DlsResult<Profile> {
    let xpoint = start.xpoint;
    let r_leg_ref = start.r.slice(s![..=xpoint]);
    let z_leg_ref = start.z.slice(s![..=xpoint]);

    // Cord fractions of the start leg: the resampling abscissae that keep
    // every profile's points arc-length-matched to the baseline.
    let dist = cord_distance(r_leg_ref, z_leg_ref)?;

    let xs_rev = xs.slice(s![..;-1]);
    let ys_rev = ys.slice(s![..;-1]);
    let leg_spline = CordSpline::fit(xs_rev, ys_rev)?;
    let (r_leg_new, z_leg_new) = leg_spline.evaluate_many(dist.view());

    let r = concatenate![Axis(0), r_leg_new, start.r.slice(s![xpoint + 1..])];
    let z = concatenate![Axis(0), z_leg_new, start.z.slice(s![xpoint + 1..])];

    let spol = poloidal_lengths(r.view(), z.view());
    let bpol = start.bpol.clone();

    // Toroidal component of the reference field, rescaled under the new
    // geometry: Btor ~ 1/R along a fixed flux surface.
    let bpol_leg = start.bpol.slice(s![..=xpoint]);
    let btot_leg_ref = start.btot.slice(s![..=xpoint]);
    let mut btot_leg_new = Array1::zeros(xpoint + 1);
    for i in 0..=xpoint {
        let btor_ref = (btot_leg_ref[i].powi(2) - bpol_leg[i].powi(2)).sqrt();
        let btor_new = btor_ref * (r_leg_ref[i] / r_leg_new[i]);
        btot_leg_new[i] = (btor_new.powi(2) + bpol_leg[i].powi(2)).sqrt();
    }

    let btot = concatenate![Axis(0), btot_leg_new, start.btot.slice(s![xpoint + 1..])];
    let s = parallel_lengths(r.view(), z.view(), btot.view(), bpol.view())?;

    Ok(Profile {
        x,
        y,
        xs,
        ys,
        r_leg: r_leg_new,
        z_leg: z_leg_new,
        r,
        z,
        btot,
        bpol,
        s,
        spol,
        xpoint,
    })
}
