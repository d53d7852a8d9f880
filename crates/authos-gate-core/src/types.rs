use std::collections::HashSet;

/// Identity of this application towards Authos.
///
/// Built only from configuration, never from request data.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredential {
    app_code: String,
    app_secret: String,
}

impl AppCredential {
    #[must_use]
    pub fn new(app_code: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_code: app_code.into(),
            app_secret: app_secret.into(),
        }
    }

    #[must_use]
    pub fn app_code(&self) -> &str {
        &self.app_code
    }

    #[must_use]
    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }
}

impl std::fmt::Debug for AppCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredential")
            .field("app_code", &self.app_code)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Request paths exempt from the access check.
///
/// Matching is exact string comparison on the request path. There is no
/// prefix or glob matching: `/health` does not cover `/health/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhitelistSet {
    paths: HashSet<String>,
}

impl WhitelistSet {
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WhitelistSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
