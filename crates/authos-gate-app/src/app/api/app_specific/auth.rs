use salvo::{Depot, Request, Response, Router, handler, http::Method, http::StatusCode, writing::Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::app::api::response::{
    BODY_REQUIRED, CREDENTIALS_REQUIRED, ErrorResponse, INTERNAL_ERROR, INVALID_JSON,
    METHOD_NOT_ALLOWED, render_error,
};
use authos_gate_service::auth::get_authos_api_from_depot;

/// ## Summary
/// Login request payload
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both credentials, if both are present and non-empty.
    fn credentials(self) -> Option<(String, String)> {
        let username = self.username.filter(|u| !u.is_empty())?;
        let password = self.password.filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

/// Decodes a login body, which must be a JSON object.
fn parse_login_request(body: &[u8]) -> serde_json::Result<LoginRequest> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// ## Summary
/// Login relay. Forwards the credentials to Authos together with the app
/// credential and mirrors the Authos status and body back to the caller.
///
/// This handler never judges the credentials itself; it only checks their shape.
///
/// ## Errors
/// Returns HTTP 405 for any method but POST
/// Returns HTTP 400 if the body is empty, not JSON, or lacks a username or password
/// Returns HTTP 500 if Authos cannot be reached
#[handler]
#[tracing::instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
async fn login_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing login request");

    if req.method() != Method::POST {
        render_error(
            res,
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new(METHOD_NOT_ALLOWED),
        );
        return;
    }

    let body = match req.payload().await {
        Ok(bytes) => bytes.clone(),
        Err(e) => {
            error!(error = ?e, "Failed to read login request body");
            render_error(res, StatusCode::BAD_REQUEST, ErrorResponse::new(BODY_REQUIRED));
            return;
        }
    };

    if body.is_empty() {
        render_error(res, StatusCode::BAD_REQUEST, ErrorResponse::new(BODY_REQUIRED));
        return;
    }

    let login_req = match parse_login_request(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(error = %e, "Login request body is not a JSON object");
            render_error(res, StatusCode::BAD_REQUEST, ErrorResponse::new(INVALID_JSON));
            return;
        }
    };

    let Some((username, password)) = login_req.credentials() else {
        render_error(
            res,
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(CREDENTIALS_REQUIRED),
        );
        return;
    };

    let api = match get_authos_api_from_depot(depot) {
        Ok(api) => api,
        Err(e) => {
            error!(error = ?e, "Failed to get Authos API from depot");
            render_error(
                res,
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(INTERNAL_ERROR),
            );
            return;
        }
    };

    let result = api.proxy_login(&username, &password).await;

    if result.is_success() {
        tracing::info!(username = %username, "User logged in through Authos");
    } else {
        tracing::info!(username = %username, status = %result.status, "Authos login failed");
    }

    res.status_code(result.status);
    res.render(Json(result.body));
}

#[must_use]
pub fn routes(login_path: &str) -> Router {
    Router::with_path(login_path.trim_start_matches('/')).goal(login_handler)
}
