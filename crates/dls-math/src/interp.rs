//! Finite-difference gradients on nonuniform abscissae and paired filtering
//! of incomplete samples.

use ndarray::{Array1, ArrayView1};

use dls_types::error::{DlsError, DlsResult};

/// Numerical gradient df/dx on (possibly unevenly spaced) abscissae.
///
/// Interior points use the second-order three-point stencil for nonuniform
/// spacing; the two end points fall back to one-sided first-order
/// differences.
pub fn gradient_nonuniform(
    f: ArrayView1<'_, f64>,
    x: ArrayView1<'_, f64>,
) -> DlsResult<Array1<f64>> {
    let n = f.len();
    if x.len() != n {
        return Err(DlsError::ShapeMismatch(format!(
            "gradient: {n} samples, {} abscissae",
            x.len()
        )));
    }
    if n < 2 {
        return Err(DlsError::ShapeMismatch(
            "gradient needs at least 2 samples".into(),
        ));
    }

    let mut grad = Array1::zeros(n);
    grad[0] = (f[1] - f[0]) / (x[1] - x[0]);
    grad[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        grad[i] =
            (hs * hs * f[i + 1] + (hd * hd - hs * hs) * f[i] - hd * hd * f[i - 1])
                / (hs * hd * (hs + hd));
    }

    Ok(grad)
}

/// Drop every index where either sequence holds a NaN.
///
/// Order of surviving samples is preserved. Returns the filtered pair plus
/// the number of dropped entries.
pub fn filter_paired(a: &[f64], b: &[f64]) -> DlsResult<(Vec<f64>, Vec<f64>, usize)> {
    if a.len() != b.len() {
        return Err(DlsError::ShapeMismatch(format!(
            "paired filter: {} vs {} samples",
            a.len(),
            b.len()
        )));
    }

    let mut fa = Vec::with_capacity(a.len());
    let mut fb = Vec::with_capacity(b.len());
    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va.is_nan() || vb.is_nan() {
            continue;
        }
        fa.push(va);
        fb.push(vb);
    }
    let dropped = a.len() - fa.len();
    Ok((fa, fb, dropped))
}
