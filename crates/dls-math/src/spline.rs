//! Cubic splines and cord-length parametrization.
//!
//! Field-line legs are general plane curves: they can fold back on
//! themselves, so x is not a usable independent variable. Curves are instead
//! parametrized by normalized cumulative cord length and interpolated
//! per-component, which keeps self-intersecting control polygons legal.

use ndarray::{Array1, ArrayView1};

use dls_types::error::{DlsError, DlsResult};

/// Minimum number of control points accepted by the parametric spline fit.
pub const MIN_CONTROL_POINTS: usize = 4;

/// Number of dense samples produced by [`CordSpline::sample`] by default.
pub const DEFAULT_SAMPLES: usize = 200;

/// Natural cubic spline over strictly increasing knots.
///
/// Second-derivative formulation: construction runs one tridiagonal sweep,
/// evaluation is a binary search plus the two-knot cubic formula.
/// Evaluation outside the knot range extrapolates with the boundary
/// polynomial.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    y2s: Vec<f64>,
}

impl CubicSpline {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> DlsResult<Self> {
        if xs.len() != ys.len() {
            return Err(DlsError::ShapeMismatch(format!(
                "spline knots: {} x values, {} y values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(DlsError::InsufficientPoints {
                required: 2,
                actual: xs.len(),
            });
        }
        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(DlsError::NonMonotonicInput(format!(
                    "spline knots not strictly increasing at index {i}: {} <= {}",
                    xs[i],
                    xs[i - 1]
                )));
            }
        }

        let n = xs.len();
        let mut y2s = vec![0.0; n];
        let mut u = vec![0.0; n - 1];

        // Forward sweep of the natural-spline tridiagonal system
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // Back substitution
        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        Ok(CubicSpline { xs, ys, y2s })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();

        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }
}

/// Normalized cumulative cord length along a 2D point sequence.
///
/// Returns u with `u[0] = 0`, `u[last] = 1`, non-decreasing. The curve may
/// fold back on itself; only a totally degenerate curve (zero total length)
/// is rejected.
pub fn cord_distance(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> DlsResult<Array1<f64>> {
    if x.len() != y.len() {
        return Err(DlsError::ShapeMismatch(format!(
            "cord distance: {} x values, {} y values",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(DlsError::DegenerateCurve("empty point sequence".into()));
    }

    let n = x.len();
    let mut u = Array1::zeros(n);
    let mut total = 0.0;
    for i in 1..n {
        let dx = x[i] - x[i - 1];
        let dy = y[i] - y[i - 1];
        total += (dx * dx + dy * dy).sqrt();
        u[i] = total;
    }

    if total <= 0.0 {
        return Err(DlsError::DegenerateCurve(format!(
            "total cord length is zero over {n} points"
        )));
    }

    u.mapv_inplace(|v| v / total);
    Ok(u)
}

/// Parametric spline over a 2D point sequence, using normalized cord length
/// as the independent variable.
#[derive(Debug, Clone)]
pub struct CordSpline {
    u: Array1<f64>,
    sx: CubicSpline,
    sy: CubicSpline,
}

impl CordSpline {
    /// Fit a parametric spline through the given points, in order.
    ///
    /// Needs at least [`MIN_CONTROL_POINTS`] points. Consecutive duplicate
    /// points collapse a cord segment and are rejected through the knot
    /// monotonicity check.
    pub fn fit(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> DlsResult<Self> {
        if x.len() < MIN_CONTROL_POINTS {
            return Err(DlsError::InsufficientPoints {
                required: MIN_CONTROL_POINTS,
                actual: x.len(),
            });
        }
        let u = cord_distance(x, y)?;
        let sx = CubicSpline::new(u.to_vec(), x.to_vec())?;
        let sy = CubicSpline::new(u.to_vec(), y.to_vec())?;
        Ok(CordSpline { u, sx, sy })
    }

    /// Point on the curve at parameter `t`, normally within [0, 1].
    pub fn evaluate(&self, t: f64) -> (f64, f64) {
        (self.sx.evaluate(t), self.sy.evaluate(t))
    }

    /// Evaluate the curve at each parameter in `ts`.
    pub fn evaluate_many(&self, ts: ArrayView1<'_, f64>) -> (Array1<f64>, Array1<f64>) {
        let xs = ts.mapv(|t| self.sx.evaluate(t));
        let ys = ts.mapv(|t| self.sy.evaluate(t));
        (xs, ys)
    }

    /// Dense sampling at `n` uniform parameter values over the full range.
    pub fn sample(&self, n: usize) -> (Array1<f64>, Array1<f64>) {
        let ts = Array1::linspace(self.u[0], self.u[self.u.len() - 1], n);
        self.evaluate_many(ts.view())
    }

    /// Cord parameter values of the original control points.
    pub fn knots(&self) -> ArrayView1<'_, f64> {
        self.u.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_spline_passes_through_knots() {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![2.0, 3.0, 5.0, 4.0, 1.0];
        let spline = CubicSpline::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            let v = spline.evaluate(*x);
            assert!(
                (v - y).abs() < 1e-12,
                "spline({x}) = {v}, expected {y}"
            );
        }
    }

    #[test]
    fn test_spline_rejects_unsorted_knots() {
        let err = CubicSpline::new(vec![0.0, 2.0, 1.0, 3.0], vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, DlsError::NonMonotonicInput(_)));
    }

    #[test]
    fn test_cord_distance_straight_line() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = Array1::zeros(5);
        let u = cord_distance(x.view(), y.view()).unwrap();
        let expected = [0.0, 0.25, 0.5, 0.75, 1.0];
        for (a, b) in u.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-14, "u = {u:?}");
        }
    }

    #[test]
    fn test_cord_distance_allows_folded_curve() {
        // Doubles back on itself: non-unique x is legal
        let x = array![0.0, 1.0, 0.0, 1.0];
        let y = array![0.0, 0.0, 0.1, 0.1];
        let u = cord_distance(x.view(), y.view()).unwrap();
        assert_eq!(u[0], 0.0);
        assert!((u[3] - 1.0).abs() < 1e-14);
        for i in 1..4 {
            assert!(u[i] > u[i - 1]);
        }
    }

    #[test]
    fn test_cord_distance_rejects_zero_length() {
        let x = Array1::from_elem(4, 2.5);
        let y = Array1::from_elem(4, -1.0);
        let err = cord_distance(x.view(), y.view()).unwrap_err();
        assert!(matches!(err, DlsError::DegenerateCurve(_)));
    }

    #[test]
    fn test_cord_spline_needs_four_points() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 0.5, 0.0];
        let err = CordSpline::fit(x.view(), y.view()).unwrap_err();
        assert!(matches!(
            err,
            DlsError::InsufficientPoints {
                required: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_cord_spline_reproduces_straight_line() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = array![0.0, 0.0, 0.0, 0.0, 0.0];
        let spl = CordSpline::fit(x.view(), y.view()).unwrap();

        let (xs, ys) = spl.sample(50);
        assert_eq!(xs.len(), 50);
        for i in 0..50 {
            let t = i as f64 / 49.0;
            assert!((xs[i] - 4.0 * t).abs() < 1e-10, "xs[{i}] = {}", xs[i]);
            assert!(ys[i].abs() < 1e-10);
        }
    }

    #[test]
    fn test_cord_spline_evaluate_at_knots() {
        let x = array![1.0, 1.5, 1.2, 0.8, 0.5];
        let y = array![-1.0, -0.5, 0.0, 0.4, 1.0];
        let spl = CordSpline::fit(x.view(), y.view()).unwrap();

        let knots = spl.knots().to_owned();
        for (i, &t) in knots.iter().enumerate() {
            let (px, py) = spl.evaluate(t);
            assert!((px - x[i]).abs() < 1e-12, "x at knot {i}");
            assert!((py - y[i]).abs() < 1e-12, "y at knot {i}");
        }
    }
}
