pub mod api;

use std::sync::Arc;

use salvo::Service;

use crate::error::AppResult;
use crate::middleware::auth::AuthosInterceptor;
use authos_gate_core::config::Settings;
use authos_gate_service::{
    auth::AuthosApiHandler,
    authos::{AuthosApi, AuthosClient, CachedAuthosApi},
};

/// ## Summary
/// Builds the Authos API described by the configuration: the HTTP client,
/// wrapped in the decision cache when `intercept.cache_ttl_secs` is non-zero.
///
/// ## Errors
/// Returns an error if the HTTP client cannot be built.
pub fn authos_api_from_settings(settings: &Settings) -> AppResult<Arc<dyn AuthosApi>> {
    let client = AuthosClient::new(&settings.authos)?;

    if settings.intercept.cache_enabled() {
        Ok(Arc::new(CachedAuthosApi::new(
            client,
            std::time::Duration::from_secs(settings.intercept.cache_ttl_secs),
            settings.intercept.cache_capacity,
        )))
    } else {
        Ok(Arc::new(client))
    }
}

/// ## Summary
/// Wires the router behind the service-level hoops.
///
/// The interceptor is a service hoop so that it also runs for paths no
/// route matches; unauthenticated callers never learn which routes exist.
#[must_use]
pub fn build_service(settings: &Settings, api: Arc<dyn AuthosApi>) -> Service {
    Service::new(api::routes(settings))
        .hoop(salvo::logging::Logger::new())
        .hoop(AuthosApiHandler { api })
        .hoop(AuthosInterceptor::new(settings.intercept.whitelist_set()))
}
