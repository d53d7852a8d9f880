use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::payload::CheckAccessBody;

/// Detail returned with a denial when the service gave no message.
pub const DEFAULT_DENIAL_DETAIL: &str = "Access denied";

/// Detail returned when the access check could not reach a decision.
pub const UNAVAILABLE_DETAIL: &str = "Authos service unavailable";

/// One access question: may the bearer of `token` perform `action` on `resource`?
#[derive(Clone, PartialEq, Eq)]
pub struct AccessQuery {
    pub token: String,
    /// Request path
    pub resource: String,
    /// Request method
    pub action: String,
}

impl AccessQuery {
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            resource: resource.into(),
            action: action.into(),
        }
    }
}

impl std::fmt::Debug for AccessQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessQuery")
            .field("token", &"<redacted>")
            .field("resource", &self.resource)
            .field("action", &self.action)
            .finish()
    }
}

/// How an [`AccessDecision`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOrigin {
    /// The service answered 200 and the body was decoded.
    AccessCheck,
    /// The service answered with a non-200 status.
    Rejected { status: u16 },
    /// No usable answer: transport failure, timeout or undecodable body.
    Unavailable,
}

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub user_id: Option<String>,
    pub message: Option<String>,
    pub origin: DecisionOrigin,
}

impl AccessDecision {
    /// Decision read from a 200 response.
    #[must_use]
    pub fn from_body(body: CheckAccessBody) -> Self {
        Self {
            allowed: body.allowed,
            user_id: body.user_id,
            message: body.message,
            origin: DecisionOrigin::AccessCheck,
        }
    }

    /// Denial for a non-200 response. The body never grants access here.
    #[must_use]
    pub fn rejected(status: u16, body: CheckAccessBody) -> Self {
        Self {
            allowed: false,
            user_id: body.user_id,
            message: body.message,
            origin: DecisionOrigin::Rejected { status },
        }
    }

    /// Fail-closed denial used when the service cannot be consulted.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            allowed: false,
            user_id: None,
            message: Some(UNAVAILABLE_DETAIL.to_string()),
            origin: DecisionOrigin::Unavailable,
        }
    }

    #[must_use]
    pub fn denial_detail(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_DENIAL_DETAIL)
    }

    /// Only answers decoded from a 200 response may be remembered.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        matches!(self.origin, DecisionOrigin::AccessCheck)
    }
}

/// Response of a proxied login, relayed to the caller as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResult {
    pub status: StatusCode,
    pub body: Value,
}

impl LoginResult {
    #[must_use]
    pub const fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Synthesized 500 result for a login that never got a usable response.
    #[must_use]
    pub fn service_error(cause: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "message": format!("Authos service error: {cause}") }),
        }
    }

    /// Token issued by the service, if the login succeeded.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.body.get("token").and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}
