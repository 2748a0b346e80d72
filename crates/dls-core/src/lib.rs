//! Divertor leg morphing and detachment-front sensitivity.
//!
//! Pipeline: a [`morph::MorphEngine`] holds an immutable reference geometry
//! plus start/end baseline profiles, and produces blended
//! [`dls_types::state::Profile`] values per requested factor. Scalar
//! diagnostics live in [`metrics`]; the front-sensitivity inversion in
//! [`sensitivity`] is independent of the morphing pipeline.

pub mod metrics;
pub mod morph;
pub mod reconstruct;
pub mod sensitivity;
pub mod shift;
