use salvo::{Router, handler};

use authos_gate_core::constants::HEALTH_PATH;

#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(HEALTH_PATH.trim_start_matches('/')).get(healthcheck)
}
