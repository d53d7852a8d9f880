use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_AUTHOS_TIMEOUT_SECS, DEFAULT_LOGIN_PATH, FAVICON_PATH, HEALTH_PATH,
        MAX_CACHE_TTL_SECS,
    },
    error::{CoreError, CoreResult},
    types::{AppCredential, WhitelistSet},
};

/// Prefix of environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "AUTHOS_GATE";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub authos: AuthosConfig,
    pub intercept: InterceptConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub login_path: String,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the Authos service and the credential this app presents to it.
#[derive(Clone, Deserialize)]
pub struct AuthosConfig {
    pub host: String,
    pub app_code: String,
    pub app_secret: String,
    pub timeout_secs: u64,
}

impl AuthosConfig {
    /// ## Summary
    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    #[must_use]
    pub fn credential(&self) -> AppCredential {
        AppCredential::new(self.app_code.clone(), self.app_secret.clone())
    }

    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for AuthosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthosConfig")
            .field("host", &self.host)
            .field("app_code", &self.app_code)
            .field("app_secret", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterceptConfig {
    pub whitelist: Vec<String>,
    /// Zero disables the decision cache.
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
}

impl InterceptConfig {
    #[must_use]
    pub fn whitelist_set(&self) -> WhitelistSet {
        self.whitelist.iter().cloned().collect()
    }

    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `config.toml`, in increasing order of precedence for the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Self::builder_with_defaults()?
                .add_source(
                    config::Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("__")
                        .separator("__")
                        .list_separator(",")
                        .with_list_parse_key("intercept.whitelist")
                        .ignore_empty(true)
                        .try_parsing(true),
                )
                .add_source(config::File::with_name("config.toml").required(false)),
        )
    }

    /// ## Summary
    /// Loads configuration from defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is invalid or required keys are missing.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::from_builder(
            Self::builder_with_defaults()?
                .add_source(config::File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8700)?
            .set_default("server.login_path", DEFAULT_LOGIN_PATH)?
            .set_default("authos.timeout_secs", DEFAULT_AUTHOS_TIMEOUT_SECS)?
            .set_default(
                "intercept.whitelist",
                vec![DEFAULT_LOGIN_PATH, HEALTH_PATH, FAVICON_PATH],
            )?
            .set_default("intercept.cache_ttl_secs", 0)?
            .set_default("intercept.cache_capacity", 10_000)?
            .set_default("logging.level", "info")?)
    }

    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings = builder.build()?.try_deserialize::<Self>()?;
        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks the values the gate cannot run without.
    ///
    /// ## Errors
    /// Returns `ConfigError` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.authos.host.trim().is_empty() {
            return Err(CoreError::ConfigError("authos.host must not be empty".to_string()));
        }
        if self.authos.app_code.is_empty() {
            return Err(CoreError::ConfigError(
                "authos.app_code must not be empty".to_string(),
            ));
        }
        if self.authos.app_secret.is_empty() {
            return Err(CoreError::ConfigError(
                "authos.app_secret must not be empty".to_string(),
            ));
        }
        if self.authos.timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "authos.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.intercept.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(CoreError::ConfigError(format!(
                "intercept.cache_ttl_secs must not exceed {MAX_CACHE_TTL_SECS}: {}",
                self.intercept.cache_ttl_secs
            )));
        }
        if !self.server.login_path.starts_with('/') {
            return Err(CoreError::ConfigError(format!(
                "server.login_path must start with '/': {}",
                self.server.login_path
            )));
        }
        // An unlisted login path would demand a token before one can be issued.
        if !self.intercept.whitelist.contains(&self.server.login_path) {
            return Err(CoreError::ConfigError(format!(
                "server.login_path {} must be listed in intercept.whitelist",
                self.server.login_path
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
