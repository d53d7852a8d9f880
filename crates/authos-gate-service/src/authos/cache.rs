use std::time::Duration;

use moka::future::Cache;
use sha2::{Digest, Sha256};

use super::{
    AuthosApi,
    types::{AccessDecision, AccessQuery, LoginResult},
};

/// Remembers access decisions for a bounded time.
///
/// Entries are advisory: they expire after the configured TTL and only
/// answers decoded from a 200 response are stored. Transport failures and
/// non-200 denials always go back to the service on the next request.
/// Keys hold a SHA-256 digest of the token, never the token itself.
pub struct CachedAuthosApi<A> {
    inner: A,
    decisions: Cache<String, AccessDecision>,
}

impl<A: AuthosApi> CachedAuthosApi<A> {
    #[must_use]
    pub fn new(inner: A, ttl: Duration, capacity: u64) -> Self {
        let decisions = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        tracing::info!(
            ttl_secs = ttl.as_secs(),
            capacity,
            "Access decision cache enabled"
        );

        Self { inner, decisions }
    }

    fn cache_key(query: &AccessQuery) -> String {
        let digest = Sha256::digest(query.token.as_bytes());
        format!(
            "{}:{}:{}",
            hex::encode(digest),
            query.action,
            query.resource
        )
    }
}

#[salvo::async_trait]
impl<A: AuthosApi> AuthosApi for CachedAuthosApi<A> {
    async fn proxy_login(&self, username: &str, password: &str) -> LoginResult {
        self.inner.proxy_login(username, password).await
    }

    async fn check_access(&self, query: &AccessQuery) -> AccessDecision {
        let key = Self::cache_key(query);

        if let Some(decision) = self.decisions.get(&key).await {
            tracing::trace!(
                resource = %query.resource,
                action = %query.action,
                allowed = decision.allowed,
                "Access decision served from cache"
            );
            return decision;
        }

        let decision = self.inner.check_access(query).await;
        if decision.is_cacheable() {
            self.decisions.insert(key, decision.clone()).await;
        }
        decision
    }
}
