//! Gateway configuration loading and types.

use serde::Deserialize;
use std::path::Path;

use crate::error::{GatewayError, GatewayResult};

/// Root gateway configuration. Every section has defaults, so an empty
/// document (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Must exceed `upstream.timeout_secs`.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_request_timeout() -> u64 {
    60
}

fn default_upstream_timeout() -> u64 {
    30
}

/// The remote docs API all requests are translated to.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            timeout_secs: default_upstream_timeout(),
        }
    }
}

fn default_upstream_url() -> String {
    "https://dash.readme.com/api/v1".to_string()
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_metrics_path(),
        }
    }
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            max_age_secs: default_max_age(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_allowed_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "DELETE".to_string(),
        "OPTIONS".to_string(),
    ]
}

fn default_allowed_headers() -> Vec<String> {
    vec![
        "Content-Type".to_string(),
        "Authorization".to_string(),
        "x-api-key".to_string(),
    ]
}

fn default_max_age() -> u64 {
    86400
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

fn default_log_level() -> String {
    "info,docslug_gateway=debug".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl GatewayConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GatewayResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GatewayError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(content: &str) -> GatewayResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {e}")))
    }

    /// Get the configuration file path from environment or default.
    pub fn config_path() -> String {
        std::env::var("DOCSLUG_CONFIG").unwrap_or_else(|_| "./config/gateway.yaml".to_string())
    }

    /// Load from [`Self::config_path`], falling back to defaults when the
    /// file does not exist, then apply environment overrides and validate.
    pub fn load() -> GatewayResult<Self> {
        let path = Self::config_path();
        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("DOCSLUG_HOST") {
            self.server.host = host;
        }
        let port = std::env::var("DOCSLUG_PORT").or_else(|_| std::env::var("PORT"));
        if let Ok(port) = port {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(url) = std::env::var("DOCSLUG_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> GatewayResult<()> {
        let url = reqwest::Url::parse(&self.upstream.base_url).map_err(|e| {
            GatewayError::Config(format!(
                "Invalid upstream base_url '{}': {e}",
                self.upstream.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!(
                "Upstream base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(GatewayError::Config(
                "upstream.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.server.request_timeout_secs <= self.upstream.timeout_secs {
            return Err(GatewayError::Config(format!(
                "server.request_timeout_secs ({}) must be greater than upstream.timeout_secs ({})",
                self.server.request_timeout_secs, self.upstream.timeout_secs
            )));
        }
        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
