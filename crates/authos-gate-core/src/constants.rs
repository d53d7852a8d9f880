/// Route components of the Authos public API
pub const AUTHOS_PUBLIC_PREFIX: &str = "/api/public";

pub const PROXY_LOGIN_PATH: &str = const_str::concat!(AUTHOS_PUBLIC_PREFIX, "/proxy-login");
pub const CHECK_ACCESS_PATH: &str = const_str::concat!(AUTHOS_PUBLIC_PREFIX, "/check-access");

/// Route components served by the gate itself
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const DEFAULT_LOGIN_PATH: &str = const_str::concat!(API_ROUTE_PREFIX, "/login");
pub const HEALTH_PATH: &str = "/health";
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Literal scheme prefix of the `Authorization` header. Case-sensitive, single space.
pub const BEARER_PREFIX: &str = "Bearer ";

pub const DEFAULT_AUTHOS_TIMEOUT_SECS: u64 = 5;

/// Longest accepted decision cache TTL, one day.
pub const MAX_CACHE_TTL_SECS: u64 = 86_400;
