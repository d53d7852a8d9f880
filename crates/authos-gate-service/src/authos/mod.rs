//! Delegated authentication and authorization against Authos.
//!
//! ## Module Organization
//!
//! - `client`: `AuthosClient`, the HTTP implementation of [`AuthosApi`]
//! - `cache`: `CachedAuthosApi`, a time-bounded decision cache in front of any [`AuthosApi`]
//! - `payload`: request and response bodies of the Authos public API
//! - `types`: access queries, decisions and login results
//!
//! Every remote outcome resolves to a value. Transport failures become a 500
//! login result or a denied access decision; they never surface as errors.

pub mod cache;
pub mod client;
pub mod payload;
pub mod types;

pub use cache::CachedAuthosApi;
pub use client::AuthosClient;
pub use types::{AccessDecision, AccessQuery, DecisionOrigin, LoginResult};

/// The two calls the gate makes against Authos.
#[salvo::async_trait]
pub trait AuthosApi: Send + Sync {
    /// Relays user credentials together with the app credential.
    async fn proxy_login(&self, username: &str, password: &str) -> LoginResult;

    /// Asks whether `query` is permitted. Must deny on any failure.
    async fn check_access(&self, query: &AccessQuery) -> AccessDecision;
}
