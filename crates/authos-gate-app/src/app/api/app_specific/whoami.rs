use salvo::prelude::Json;
use salvo::{Depot, Router, handler};
use serde_json::json;

use authos_gate_service::auth::get_user_id_from_depot;

/// ## Summary
/// Returns the user id Authos reported for this request.
/// The id is placed in the depot by the `AuthosInterceptor`.
#[handler]
async fn whoami(depot: &Depot) -> Json<serde_json::Value> {
    match get_user_id_from_depot(depot) {
        Ok(user_id) => Json(json!({ "userId": user_id })),
        Err(_) => Json(json!({ "status": "anonymous" })),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").get(whoami)
}
