use thiserror::Error;

#[derive(Error, Debug)]
pub enum DlsError {
    #[error("Insufficient control points: spline fit needs {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("Degenerate curve: {0}")]
    DegenerateCurve(String),

    #[error("Singular poloidal field at index {index}: Bpol = {bpol}")]
    SingularField { index: usize, bpol: f64 },

    #[error("Non-monotonic input: {0}")]
    NonMonotonicInput(String),

    #[error("Array shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DlsResult<T> = Result<T, DlsError>;
