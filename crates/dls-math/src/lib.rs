//! Numerical primitives for the divertor leg morphing core.

pub mod interp;
pub mod spline;
