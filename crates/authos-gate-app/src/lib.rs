//! HTTP surface of the Authos gate: the request interceptor, the login relay
//! and the service wiring used by the binary and the integration tests.

pub mod app;
pub mod error;
pub mod middleware;
