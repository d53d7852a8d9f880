//! Wire shapes exchanged with the Authos public API.
//!
//! Request payloads borrow from the caller and deliberately do not derive
//! `Debug`: they carry the app secret and user passwords.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use authos_gate_core::types::AppCredential;

/// Body of `POST /api/public/proxy-login`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyLoginPayload<'a> {
    pub app_code: &'a str,
    pub app_secret: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> ProxyLoginPayload<'a> {
    #[must_use]
    pub fn new(credential: &'a AppCredential, username: &'a str, password: &'a str) -> Self {
        Self {
            app_code: credential.app_code(),
            app_secret: credential.app_secret(),
            username,
            password,
        }
    }
}

/// Body of `POST /api/public/check-access`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAccessPayload<'a> {
    pub app_code: &'a str,
    pub app_secret: &'a str,
    pub token: &'a str,
    /// Request path
    pub obj: &'a str,
    /// Request method
    pub act: &'a str,
}

impl<'a> CheckAccessPayload<'a> {
    #[must_use]
    pub fn new(credential: &'a AppCredential, token: &'a str, obj: &'a str, act: &'a str) -> Self {
        Self {
            app_code: credential.app_code(),
            app_secret: credential.app_secret(),
            token,
            obj,
            act,
        }
    }
}

/// Response of `POST /api/public/check-access`.
///
/// Every field is optional on the wire. `allowed` is only `true` when the
/// service sent the JSON literal `true`; anything else reads as a denial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckAccessBody {
    #[serde(default, deserialize_with = "explicit_grant")]
    pub allowed: bool,

    #[serde(default, rename = "userId", deserialize_with = "user_id")]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "string_field")]
    pub message: Option<String>,
}

fn explicit_grant<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Authos issues numeric user ids; other deployments may use strings.
fn user_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) if !id.is_empty() => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

fn string_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}
