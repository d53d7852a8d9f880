//! Shared configuration, constants and types for the Authos gate.
//!
//! This crate has no HTTP dependencies; the service and app crates build on it.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
