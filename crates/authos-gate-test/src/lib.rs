//! Authos gate - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through one dependency.

pub use authos_gate_app as app;
pub use authos_gate_core as core;
pub use authos_gate_service as service;
