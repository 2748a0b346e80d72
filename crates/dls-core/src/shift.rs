//! Control-point placement along a reference leg spline.

use ndarray::Array1;

use dls_math::spline::CordSpline;
use dls_types::config::OffsetSpec;

/// Map offset specifications onto concrete control points.
///
/// Each spec is evaluated on the reference spline at its normalized position
/// and displaced by its offsets. Output order matches input order; pure
/// function of `(spline, offsets)`.
pub fn shift_points(spline: &CordSpline, offsets: &[OffsetSpec]) -> (Array1<f64>, Array1<f64>) {
    let mut x = Array1::zeros(offsets.len());
    let mut y = Array1::zeros(offsets.len());
    for (i, spec) in offsets.iter().enumerate() {
        let (px, py) = spline.evaluate(spec.pos);
        x[i] = px + spec.offsetx;
        y[i] = py + spec.offsety;
    }
    (x, y)
}
