//! Authos integration: the remote client, the decision cache and the depot
//! helpers shared by the HTTP layer.

pub mod auth;
pub mod authos;
pub mod error;
