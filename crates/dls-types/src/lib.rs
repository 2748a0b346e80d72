//! Shared types for the divertor leg morphing core.

pub mod config;
pub mod error;
pub mod state;
