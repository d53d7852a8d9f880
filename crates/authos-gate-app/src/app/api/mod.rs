mod app_specific;
pub mod response;

use salvo::Router;

use authos_gate_core::config::Settings;
pub use authos_gate_core::constants::{API_ROUTE_COMPONENT, API_ROUTE_PREFIX};

/// ## Summary
/// Constructs the router: the login relay at the configured path, the
/// health check and the protected application API.
#[must_use]
pub fn routes(settings: &Settings) -> Router {
    Router::new()
        .push(app_specific::auth::routes(&settings.server.login_path))
        .push(app_specific::healthcheck::routes())
        .push(Router::with_path(API_ROUTE_COMPONENT).push(app_specific::routes()))
}
