//! Client configuration
//!
//! Endpoints, credentials and transport tuning loaded from YAML. String
//! values may use `{{ env.NAME }}` so secrets stay out of the file.
//!
//! ```yaml
//! auth_url: https://console.example.com/api/v3/oauth/token
//! search_url: https://console.example.com/forensic-search/queryservice/api/v1/fileevent
//! username: analyst@example.com
//! password: "{{ env.FFS_PASSWORD }}"
//! auth_method: POST
//! http:
//!   timeout_secs: 120
//!   requests_per_second: 2
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpTransportConfig, RateLimiterConfig};
use crate::pagination::DEFAULT_AUTHORIZATION_SCHEME;
use crate::template::{render_value, TemplateContext};
use crate::types::{BackoffType, Method};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Token endpoint
    pub auth_url: String,

    /// File-event search endpoint
    pub search_url: String,

    /// Account used for the token exchange
    pub username: String,

    /// Account password
    #[serde(default)]
    pub password: String,

    /// Method of the token request (GET for the legacy endpoint)
    #[serde(default = "default_auth_method")]
    pub auth_method: Method,

    /// Scheme placed before the token in search requests
    #[serde(default = "default_authorization_scheme")]
    pub authorization_scheme: String,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_auth_method() -> Method {
    Method::POST
}

fn default_authorization_scheme() -> String {
    DEFAULT_AUTHORIZATION_SCHEME.to_string()
}

impl ClientConfig {
    /// Load from a YAML file, interpolating against the process environment
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content, &TemplateContext::from_env())
    }

    /// Parse YAML, render templates, and validate
    pub fn from_yaml_str(yaml: &str, ctx: &TemplateContext) -> Result<Self> {
        let raw: serde_json::Value = serde_yaml::from_str(yaml)?;
        let rendered = render_value(&raw, ctx)?;
        let config: Self = serde_json::from_value(rendered)
            .map_err(|e| Error::config(format!("Invalid client config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check endpoints and credentials
    pub fn validate(&self) -> Result<()> {
        validate_url("auth_url", &self.auth_url)?;
        validate_url("search_url", &self.search_url)?;

        if self.username.trim().is_empty() {
            return Err(Error::missing_field("username"));
        }
        if self.authorization_scheme.trim().is_empty() {
            return Err(Error::invalid_value(
                "authorization_scheme",
                "must not be empty",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be positive"));
        }
        Ok(())
    }

    /// Transport settings derived from the `http` block
    pub fn transport_config(&self) -> HttpTransportConfig {
        let http = &self.http;
        let mut builder = HttpTransportConfig::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_retries(http.max_retries)
            .backoff(
                http.backoff.backoff_type,
                Duration::from_millis(http.backoff.initial_ms),
                Duration::from_millis(http.backoff.max_ms),
            );

        if let Some(rps) = http.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::new(
                rps,
                http.burst_size.unwrap_or(rps),
            ));
        }
        if let Some(agent) = &http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_url", &self.auth_url)
            .field("search_url", &self.search_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_method", &self.auth_method)
            .field("authorization_scheme", &self.authorization_scheme)
            .field("http", &self.http)
            .finish()
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    let url = Url::parse(value)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_value(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Transport-level retries for 429/5xx and timeouts (0 = none)
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Requests per second limit; unset disables rate limiting
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Burst size, defaults to `requests_per_second`
    #[serde(default)]
    pub burst_size: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: 0,
            backoff: BackoffConfig::default(),
            requests_per_second: None,
            burst_size: None,
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    250
}

fn default_max_ms() -> u64 {
    30000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r"
auth_url: https://console.example.com/api/v3/oauth/token
search_url: https://console.example.com/forensic-search/queryservice/api/v1/fileevent
username: analyst@example.com
password: secret
";

    fn ctx() -> TemplateContext {
        let mut ctx = TemplateContext::new();
        ctx.set_env("FFS_PASSWORD", "from-env");
        ctx
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = ClientConfig::from_yaml_str(MINIMAL, &ctx()).unwrap();
        assert_eq!(config.username, "analyst@example.com");
        assert_eq!(config.auth_method, Method::POST);
        assert_eq!(config.authorization_scheme, "v3_user_token");
        assert_eq!(config.http.timeout_secs, 60);
        assert_eq!(config.http.max_retries, 0);
    }

    #[test]
    fn test_env_interpolation() {
        let yaml = MINIMAL.replace("password: secret", "password: \"{{ env.FFS_PASSWORD }}\"");
        let config = ClientConfig::from_yaml_str(&yaml, &ctx()).unwrap();
        assert_eq!(config.password, "from-env");
    }

    #[test]
    fn test_undefined_env_variable() {
        let yaml = MINIMAL.replace("password: secret", "password: \"{{ env.NOPE }}\"");
        let err = ClientConfig::from_yaml_str(&yaml, &ctx()).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable { .. }));
    }

    #[test]
    fn test_legacy_get_and_http_block() {
        let yaml = format!(
            "{MINIMAL}auth_method: GET\nhttp:\n  timeout_secs: 5\n  max_retries: 2\n  requests_per_second: 4\n  backoff:\n    type: linear\n    initial_ms: 100\n"
        );
        let config = ClientConfig::from_yaml_str(&yaml, &ctx()).unwrap();
        assert_eq!(config.auth_method, Method::GET);

        let transport = config.transport_config();
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.max_retries, 2);
        assert_eq!(transport.backoff_type, BackoffType::Linear);
        assert_eq!(transport.initial_backoff, Duration::from_millis(100));
        assert_eq!(transport.rate_limit, Some(RateLimiterConfig::new(4, 4)));
    }

    #[test]
    fn test_default_transport_config_has_no_retries_or_limit() {
        let config = ClientConfig::from_yaml_str(MINIMAL, &ctx()).unwrap();
        let transport = config.transport_config();
        assert_eq!(transport.max_retries, 0);
        assert!(transport.rate_limit.is_none());
    }

    #[test]
    fn test_invalid_url() {
        let yaml = MINIMAL.replace(
            "https://console.example.com/api/v3/oauth/token",
            "not a url",
        );
        let err = ClientConfig::from_yaml_str(&yaml, &ctx()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_unsupported_scheme() {
        let yaml = MINIMAL.replace("https://console.example.com/forensic", "ftp://console.example.com/forensic");
        let err = ClientConfig::from_yaml_str(&yaml, &ctx()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "search_url"));
    }

    #[test]
    fn test_empty_username() {
        let yaml = MINIMAL.replace("analyst@example.com", "\"\"");
        let err = ClientConfig::from_yaml_str(&yaml, &ctx()).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "username"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = ClientConfig::from_yaml_str("username: a\n", &ctx()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = ClientConfig::from_path(file.path()).unwrap();
        assert_eq!(config.password, "secret");
    }

    #[test]
    fn test_from_missing_path() {
        let err = ClientConfig::from_path("/nonexistent/ffs.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::from_yaml_str(MINIMAL, &ctx()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
