use salvo::{Response, http::StatusCode, writing::Json};
use serde::Serialize;

pub const MISSING_AUTHORIZATION: &str = "Missing or invalid Authorization header";
pub const FORBIDDEN: &str = "Forbidden";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const BODY_REQUIRED: &str = "Request body is required";
pub const INVALID_JSON: &str = "Invalid JSON";
pub const CREDENTIALS_REQUIRED: &str = "Username and password required";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// Writes `body` as JSON with `status`.
pub fn render_error(res: &mut Response, status: StatusCode, body: ErrorResponse) {
    res.status_code(status);
    res.render(Json(body));
}
