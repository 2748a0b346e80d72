//! Detachment-front sensitivity from an external front-location scan.
//!
//! The upstream solver provides paired (Crel, Spol) samples for one field
//! line: Crel is the dimensionless control parameter of the detachment
//! front, Spol its poloidal position. Unstable-region samples arrive as NaN
//! and are dropped pairwise before the two inverse interpolants are built.

use std::fmt;

use dls_math::interp::filter_paired;
use dls_math::spline::CubicSpline;
use dls_types::error::DlsResult;

/// Default fractional perturbation of the front control parameter.
pub const DEFAULT_FLUCTUATION: f64 = 1.1;

/// Default query location (the target) as a fraction of poloidal leg length.
pub const DEFAULT_LOCATION: f64 = 0.0;

/// A front below the first stable Crel by more than this is unconstrained.
const UNSTABLE_TOL: f64 = 1e-6;

/// Inverse-interpolation front-sensitivity calculator.
#[derive(Debug, Clone)]
pub struct FrontSensitivity {
    spol_of_crel: CubicSpline,
    crel_of_spol: CubicSpline,
    crel_first: f64,
    spol_total: f64,
    dropped: usize,
}

/// Intermediate quantities of one sensitivity evaluation, for reporting.
#[derive(Debug, Clone, Copy)]
pub struct SensitivityReport {
    pub spol_at_loc: f64,
    pub crel_at_loc: f64,
    pub sensitivity: f64,
    pub dropped_samples: usize,
}

impl fmt::Display for SensitivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Spol at location: {:.3}", self.spol_at_loc)?;
        writeln!(f, "Crel at location: {:.3}", self.crel_at_loc)?;
        write!(f, "Sensitivity: {:.3}", self.sensitivity)
    }
}

impl FrontSensitivity {
    /// Build the two interpolants from a front-location scan.
    ///
    /// NaN entries are removed pairwise (order-preserving); the surviving
    /// Crel and Spol sequences must both be strictly increasing.
    pub fn new(crel: &[f64], spol: &[f64]) -> DlsResult<Self> {
        let (crel, spol, dropped) = filter_paired(crel, spol)?;

        let spol_of_crel = CubicSpline::new(crel.clone(), spol.clone())?;
        let crel_of_spol = CubicSpline::new(spol.clone(), crel.clone())?;

        Ok(FrontSensitivity {
            spol_of_crel,
            crel_of_spol,
            crel_first: crel[0],
            spol_total: spol[spol.len() - 1],
            dropped,
        })
    }

    /// Number of incomplete samples dropped during construction.
    pub fn dropped_samples(&self) -> usize {
        self.dropped
    }

    /// Front position after perturbing its control parameter by
    /// `fluctuation`, as a fraction of the total poloidal leg length.
    ///
    /// `location` is the query point, also as a fraction of leg length
    /// (0 = target). A location whose Crel lies below the first stable value
    /// is already unstable and returns the maximal sensitivity 1.
    pub fn sensitivity(&self, fluctuation: f64, location: f64) -> f64 {
        let spol_at_loc = self.spol_total * location;
        let crel_at_loc = self.crel_of_spol.evaluate(spol_at_loc);

        if crel_at_loc - self.crel_first < -UNSTABLE_TOL {
            return 1.0;
        }
        self.spol_of_crel.evaluate(crel_at_loc * fluctuation) / self.spol_total
    }

    /// Like [`sensitivity`](Self::sensitivity) but returns the intermediate
    /// quantities for an external reporting sink.
    pub fn report(&self, fluctuation: f64, location: f64) -> SensitivityReport {
        let spol_at_loc = self.spol_total * location;
        let crel_at_loc = self.crel_of_spol.evaluate(spol_at_loc);
        SensitivityReport {
            spol_at_loc,
            crel_at_loc,
            sensitivity: self.sensitivity(fluctuation, location),
            dropped_samples: self.dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dls_types::error::DlsError;

    #[test]
    fn test_nan_rows_dropped_before_fit() {
        let crel = [f64::NAN, 1.0, 1.2, 1.5];
        let spol = [0.9, 0.0, 0.3, 0.7];
        let fs = FrontSensitivity::new(&crel, &spol).unwrap();
        assert_eq!(fs.dropped_samples(), 1);
    }

    #[test]
    fn test_non_monotonic_crel_rejected() {
        let crel = [1.0, 1.5, 1.2];
        let spol = [0.0, 0.3, 0.7];
        let err = FrontSensitivity::new(&crel, &spol).unwrap_err();
        assert!(matches!(err, DlsError::NonMonotonicInput(_)));
    }

    #[test]
    fn test_sensitivity_at_target() {
        let crel = [1.0, 1.2, 1.5];
        let spol = [0.0, 0.3, 0.7];
        let fs = FrontSensitivity::new(&crel, &spol).unwrap();
        let sens = fs.sensitivity(DEFAULT_FLUCTUATION, DEFAULT_LOCATION);
        // Perturbed front must move off the target but stay below the first
        // scan point's position
        assert!(sens > 0.0, "sensitivity = {sens}");
        assert!(sens < 0.3 / 0.7, "sensitivity = {sens}");
    }

    #[test]
    fn test_report_matches_sensitivity() {
        let crel = [1.0, 1.2, 1.5];
        let spol = [0.0, 0.3, 0.7];
        let fs = FrontSensitivity::new(&crel, &spol).unwrap();
        let rep = fs.report(1.1, 0.0);
        assert_eq!(rep.sensitivity, fs.sensitivity(1.1, 0.0));
        assert_eq!(rep.spol_at_loc, 0.0);
        assert!((rep.crel_at_loc - 1.0).abs() < 1e-12);
        let text = rep.to_string();
        assert!(text.contains("Sensitivity"));
    }
}
