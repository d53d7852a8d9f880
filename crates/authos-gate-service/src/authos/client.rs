use salvo::http::StatusCode;
use serde_json::Value;

use authos_gate_core::{
    config::AuthosConfig,
    constants::{CHECK_ACCESS_PATH, PROXY_LOGIN_PATH},
    types::AppCredential,
};

use super::{
    AuthosApi,
    payload::{CheckAccessBody, CheckAccessPayload, ProxyLoginPayload},
    types::{AccessDecision, AccessQuery, LoginResult},
};
use crate::error::ServiceResult;

/// HTTP client for the Authos public API.
///
/// Holds the app credential and a pooled `reqwest::Client` whose timeout
/// bounds every call. Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AuthosClient {
    http: reqwest::Client,
    base_url: String,
    credential: AppCredential,
}

impl AuthosClient {
    /// ## Summary
    /// Builds a client from the `[authos]` configuration section.
    ///
    /// ## Errors
    /// Returns `HttpClientError` if the underlying HTTP client cannot be built.
    pub fn new(config: &AuthosConfig) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            credential: config.credential(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[salvo::async_trait]
impl AuthosApi for AuthosClient {
    /// ## Summary
    /// POSTs the credentials to `/api/public/proxy-login` and returns the
    /// response status and JSON body unchanged.
    ///
    /// A transport failure or a non-JSON body yields a synthesized 500 result.
    #[tracing::instrument(skip(self, password))]
    async fn proxy_login(&self, username: &str, password: &str) -> LoginResult {
        let payload = ProxyLoginPayload::new(&self.credential, username, password);

        let response = match self
            .http
            .post(self.endpoint(PROXY_LOGIN_PATH))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Proxy login request failed");
                return LoginResult::service_error(e);
            }
        };

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match response.json::<Value>().await {
            Ok(body) => {
                tracing::debug!(status = %status, "Proxy login answered");
                LoginResult::new(status, body)
            }
            Err(e) => {
                tracing::warn!(status = %status, error = %e, "Proxy login response was not JSON");
                LoginResult::service_error(e)
            }
        }
    }

    /// ## Summary
    /// POSTs the query to `/api/public/check-access`.
    ///
    /// Only a 200 response can grant access, and only with `"allowed": true`.
    /// Any other status denies. Transport failures deny with the
    /// "Authos service unavailable" detail.
    #[tracing::instrument(skip(self, query), fields(
        resource = %query.resource,
        action = %query.action
    ))]
    async fn check_access(&self, query: &AccessQuery) -> AccessDecision {
        let payload = CheckAccessPayload::new(
            &self.credential,
            &query.token,
            &query.resource,
            &query.action,
        );

        let response = match self
            .http
            .post(self.endpoint(CHECK_ACCESS_PATH))
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Access check request failed");
                return AccessDecision::unavailable();
            }
        };

        let status = response.status().as_u16();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(status, error = %e, "Failed to read access check response");
                return AccessDecision::unavailable();
            }
        };

        if status != StatusCode::OK.as_u16() {
            let body = serde_json::from_slice::<CheckAccessBody>(&bytes).unwrap_or_default();
            tracing::debug!(status, "Access check rejected");
            return AccessDecision::rejected(status, body);
        }

        match serde_json::from_slice::<CheckAccessBody>(&bytes) {
            Ok(body) => {
                let decision = AccessDecision::from_body(body);
                tracing::debug!(allowed = decision.allowed, "Access check answered");
                decision
            }
            Err(e) => {
                tracing::warn!(error = %e, "Access check response could not be decoded");
                AccessDecision::unavailable()
            }
        }
    }
}
