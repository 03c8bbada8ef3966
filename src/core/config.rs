//! Authentication configuration.
//!
//! The server loads it with `AuthConfig::from_env()` after calling `dotenvy::dotenv()`.
//! The browser bundle has no process environment, so it reads the same names at
//! compile time through `AuthConfig::from_build_env()`.

/// Name of the switch that bypasses authentication entirely
pub const DISABLE_AUTH_VAR: &str = "DISABLE_AUTH";

/// Name of the identity service base URL variable
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";

/// Identity service address used when `API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("{name} must be a boolean (true/false), got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}

/// Authentication configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Base URL of the identity service, without a trailing slash
    /// Example: http://localhost:8000/api/v1
    pub api_base_url: String,

    /// When set, every visitor is treated as the synthetic developer user
    pub disable_auth: bool,
}

impl AuthConfig {
    /// Build a configuration from explicit values.
    pub fn new(api_base_url: impl Into<String>, disable_auth: bool) -> Self {
        let api_base_url = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            disable_auth,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `DISABLE_AUTH` is mandatory so that the server and the browser bundle
    /// can never disagree about whether authentication is on.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(API_BASE_URL_VAR).ok().as_deref(),
            std::env::var(DISABLE_AUTH_VAR).ok().as_deref(),
        )
    }

    /// Load configuration baked into the binary at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("API_BASE_URL"), option_env!("DISABLE_AUTH"))
    }

    /// Resolve raw variable values into a configuration.
    pub fn from_values(
        api_base_url: Option<&str>,
        disable_auth: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let disable_auth = disable_auth.ok_or(ConfigError::Missing(DISABLE_AUTH_VAR))?;
        let disable_auth = parse_flag(DISABLE_AUTH_VAR, disable_auth)?;
        let api_base_url = api_base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);

        Ok(Self::new(api_base_url.trim(), disable_auth))
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Parse a boolean switch value.
pub fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
