//! Offset and case configuration.
//!
//! A morph case can be described in JSON and loaded from disk, mirroring how
//! control points are specified in analysis notebooks:
//!
//! ```json
//! {
//!   "start": [{"pos": 1.0}, {"pos": 0.66}, {"pos": 0.33}, {"pos": 0.0}],
//!   "end":   [{"pos": 1.0}, {"pos": 0.66, "offsetx": 0.2}, {"pos": 0.33}, {"pos": 0.0}],
//!   "factors": [0.0, 0.5, 1.0]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DlsResult;

/// One spline control point, given as a normalized position along the current
/// leg parametrization plus an optional (x, y) displacement.
///
/// Ordering convention: a control point sequence runs from the X-point end
/// (`pos` near 1) toward the target (`pos` near 0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OffsetSpec {
    /// Normalized position in [0, 1] along the reference leg spline.
    pub pos: f64,
    /// Displacement applied to the evaluated x (R) coordinate [m].
    #[serde(default)]
    pub offsetx: f64,
    /// Displacement applied to the evaluated y (Z) coordinate [m].
    #[serde(default)]
    pub offsety: f64,
}

impl OffsetSpec {
    /// Control point at `pos` with no displacement.
    pub fn at(pos: f64) -> Self {
        OffsetSpec {
            pos,
            offsetx: 0.0,
            offsety: 0.0,
        }
    }

    pub fn with_offsets(pos: f64, offsetx: f64, offsety: f64) -> Self {
        OffsetSpec {
            pos,
            offsetx,
            offsety,
        }
    }
}

/// A complete morph case: start/end control points plus the blend factors to
/// generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphCase {
    pub start: Vec<OffsetSpec>,
    pub end: Vec<OffsetSpec>,
    #[serde(default)]
    pub factors: Vec<f64>,
}

impl MorphCase {
    pub fn from_json_str(text: &str) -> DlsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> DlsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_default_to_zero() {
        let spec: OffsetSpec = serde_json::from_str(r#"{"pos": 0.5}"#).unwrap();
        assert_eq!(spec.pos, 0.5);
        assert_eq!(spec.offsetx, 0.0);
        assert_eq!(spec.offsety, 0.0);
    }

    #[test]
    fn test_case_roundtrip() {
        let case = MorphCase {
            start: vec![OffsetSpec::at(1.0), OffsetSpec::at(0.0)],
            end: vec![
                OffsetSpec::at(1.0),
                OffsetSpec::with_offsets(0.0, 0.1, -0.2),
            ],
            factors: vec![0.0, 0.5, 1.0],
        };
        let json = serde_json::to_string(&case).unwrap();
        let back = MorphCase::from_json_str(&json).unwrap();
        assert_eq!(back.start.len(), 2);
        assert_eq!(back.end[1].offsety, -0.2);
        assert_eq!(back.factors, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_json_floats_roundtrip_exactly() {
        // Requires serde_json's float_roundtrip feature: default float
        // parsing may be off by one ULP, which silently shifts control
        // point positions on reload.
        let pos = 0.056467237891362716_f64;
        let case = MorphCase {
            start: vec![OffsetSpec::at(pos)],
            end: vec![OffsetSpec::with_offsets(pos, 0.1, -0.2)],
            factors: vec![],
        };
        let json = serde_json::to_string(&case).unwrap();
        let back = MorphCase::from_json_str(&json).unwrap();
        assert_eq!(back.start[0].pos.to_bits(), pos.to_bits());
        assert_eq!(back.end[0].pos.to_bits(), pos.to_bits());
    }

    #[test]
    fn test_factors_optional() {
        let case =
            MorphCase::from_json_str(r#"{"start": [{"pos": 1.0}], "end": [{"pos": 1.0}]}"#)
                .unwrap();
        assert!(case.factors.is_empty());
    }
}
