use std::sync::Arc;

use salvo::{Depot, http::StatusCode, http::header::AUTHORIZATION};
use tracing::error;

use crate::app::api::response::{
    ErrorResponse, FORBIDDEN, INTERNAL_ERROR, MISSING_AUTHORIZATION, render_error,
};
use authos_gate_core::types::WhitelistSet;
use authos_gate_service::{
    auth::{extract_bearer_token, get_authos_api_from_depot, insert_user_id},
    authos::AccessQuery,
};

/// ## Summary
/// Gates every request through the Authos access check.
///
/// Whitelisted paths pass untouched. Any other request needs an
/// `Authorization: Bearer <token>` header; without one it is answered 401
/// locally. With one, Authos decides: a denial is answered 403 and an
/// allowed request continues to the router with the reported user id in
/// the depot.
///
/// ## Side Effects
/// Inserts the authenticated user id under `depot_keys::AUTHENTICATED_USER_ID`
/// when the decision carries one.
///
/// ## Errors
/// Returns 401 for a missing or malformed header, 403 for any denial
/// (including Authos being unreachable) and 500 if the Authos API was not
/// injected into the depot.
pub struct AuthosInterceptor {
    whitelist: Arc<WhitelistSet>,
}

impl AuthosInterceptor {
    #[must_use]
    pub fn new(whitelist: WhitelistSet) -> Self {
        Self {
            whitelist: Arc::new(whitelist),
        }
    }
}

/// Request path with percent-escapes decoded, the form the router matches on.
fn decoded_path(req: &salvo::Request) -> String {
    let raw = req.uri().path();
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

#[salvo::async_trait]
impl salvo::Handler for AuthosInterceptor {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        request_id = %uuid::Uuid::now_v7(),
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let path = decoded_path(req);

        if self.whitelist.contains(&path) {
            tracing::trace!("Whitelisted path, skipping access check");
            return;
        }

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let Some(token) = extract_bearer_token(header) else {
            tracing::debug!("Missing or malformed bearer token");
            render_error(
                res,
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(MISSING_AUTHORIZATION),
            );
            ctrl.skip_rest();
            return;
        };

        let query = AccessQuery::new(token, path, req.method().as_str());

        let api = match get_authos_api_from_depot(depot) {
            Ok(api) => api,
            Err(e) => {
                error!(error = ?e, "Failed to get Authos API from depot");
                render_error(
                    res,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR),
                );
                ctrl.skip_rest();
                return;
            }
        };

        let decision = api.check_access(&query).await;

        if !decision.allowed {
            tracing::info!(origin = ?decision.origin, "Access denied");
            render_error(
                res,
                StatusCode::FORBIDDEN,
                ErrorResponse::with_details(FORBIDDEN, decision.denial_detail()),
            );
            ctrl.skip_rest();
            return;
        }

        tracing::debug!(user_id = ?decision.user_id, "Access granted");
        if let Some(user_id) = decision.user_id {
            insert_user_id(depot, user_id);
        }
    }
}
