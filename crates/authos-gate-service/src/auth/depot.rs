//! Depot helpers for the Authos API handle and the authenticated user.

use std::sync::Arc;

use salvo::async_trait;

use crate::authos::AuthosApi;
use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    /// User id reported by Authos for an allowed request.
    pub const AUTHENTICATED_USER_ID: &str = "__authenticated_user_id";
}

/// Injects the shared Authos API into every request's depot.
pub struct AuthosApiHandler {
    pub api: Arc<dyn AuthosApi>,
}

#[async_trait]
impl salvo::Handler for AuthosApiHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.api.clone());
    }
}

/// ## Summary
/// Retrieves the Authos API from the depot.
///
/// ## Errors
/// Returns `InvariantViolation` if `AuthosApiHandler` did not run for this request.
pub fn get_authos_api_from_depot(depot: &salvo::Depot) -> ServiceResult<Arc<dyn AuthosApi>> {
    depot
        .obtain::<Arc<dyn AuthosApi>>()
        .cloned()
        .map_err(|_err| ServiceError::InvariantViolation("Authos API not found in depot"))
}

/// Records the user id of an allowed request for downstream handlers.
pub fn insert_user_id(depot: &mut salvo::Depot, user_id: String) {
    depot.insert(depot_keys::AUTHENTICATED_USER_ID, user_id);
}

/// Get the authenticated user id from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if the access decision carried no user id,
/// or if the request never passed the access check.
pub fn get_user_id_from_depot(depot: &salvo::Depot) -> ServiceResult<&str> {
    depot
        .get::<String>(depot_keys::AUTHENTICATED_USER_ID)
        .map(String::as_str)
        .map_err(|_e| ServiceError::NotAuthenticated)
}
