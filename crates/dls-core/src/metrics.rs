//! Scalar diagnostics derived from a profile.

use ndarray::s;

use dls_math::interp::gradient_nonuniform;
use dls_types::error::{DlsError, DlsResult};
use dls_types::state::Profile;

/// Connection length: total field-line-following distance from target to the
/// upstream end.
pub fn connection_length(p: &Profile) -> f64 {
    p.s[p.s.len() - 1] - p.s[0]
}

/// Total flux expansion: Btot at the X-point over Btot at the target.
pub fn total_flux_expansion(p: &Profile) -> f64 {
    p.btot[p.xpoint] / p.btot[0]
}

/// Average fractional Btot gradient below the X-point.
///
/// The gradient is taken against poloidal distance over the full field line,
/// then averaged over indices strictly below the X-point.
pub fn average_frac_grad_b(p: &Profile) -> DlsResult<f64> {
    if p.xpoint == 0 {
        return Err(DlsError::ShapeMismatch(
            "no points below the X-point".into(),
        ));
    }
    let grad = gradient_nonuniform(p.btot.view(), p.spol.view())?;
    let frac = &grad.slice(s![..p.xpoint]) / &p.btot.slice(s![..p.xpoint]);
    Ok(frac.mean().unwrap_or(f64::NAN))
}

/// Btot at the X-point over the mean Btot strictly below it.
///
/// NaN when the X-point sits at index 0 (no leg points below it).
pub fn average_b_ratio(p: &Profile) -> f64 {
    match p.btot.slice(s![..p.xpoint]).mean() {
        Some(mean) => p.btot[p.xpoint] / mean,
        None => f64::NAN,
    }
}
