//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export LOG_FORMAT="text"
//!
//! # Remote log shipping (enabled when GRAYLOG_HOST is set)
//! export GRAYLOG_HOST="logs.internal"
//! export GRAYLOG_PORT="12201"
//! export GRAYLOG_TLS="true"
//! export GRAYLOG_TLS_SKIP_VERIFY="false"
//! export GRAYLOG_CONNECT_TIMEOUT="3"
//! export GRAYLOG_SOURCE="edge-01"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `GRAYLOG_HOST` - Aggregator host (enables remote shipping if set)
//! - `GRAYLOG_PORT` - Aggregator GELF TCP port (default: `12201`)
//! - `GRAYLOG_TLS` - Wrap the aggregator connection in TLS (default: `false`)
//! - `GRAYLOG_TLS_SKIP_VERIFY` - Skip certificate verification (default: `false`)
//! - `GRAYLOG_CONNECT_TIMEOUT` - Connect timeout in seconds (default: `3`)
//! - `GRAYLOG_SOURCE` - Source host reported in shipped records (default: crate name)

use std::env;
use std::time::Duration;

use anyhow::Result;

use crate::transport::TransportConfig;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Remote aggregator settings. `None` disables shipping entirely.
    pub graylog: Option<GraylogConfig>,
}

/// Connection settings for the remote log aggregator.
#[derive(Debug, Clone)]
pub struct GraylogConfig {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    /// Skip certificate and hostname verification. Only for endpoints with
    /// self-signed certificates.
    pub insecure_skip_verify: bool,
    pub connect_timeout_seconds: u64,
    /// Source host reported in shipped records. `None` uses the crate name.
    pub source: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let graylog = Self::load_graylog();

        Self {
            listen_addr,
            log_level,
            log_format,
            graylog,
        }
    }

    /// Loads aggregator settings from components, keyed on `GRAYLOG_HOST`.
    ///
    /// Returns `None` if remote shipping is not configured.
    fn load_graylog() -> Option<GraylogConfig> {
        let host = env::var("GRAYLOG_HOST").ok()?;

        let port = env::var("GRAYLOG_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(12201);

        let use_tls = env_flag("GRAYLOG_TLS");
        let insecure_skip_verify = env_flag("GRAYLOG_TLS_SKIP_VERIFY");

        let connect_timeout_seconds = env::var("GRAYLOG_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let source = env::var("GRAYLOG_SOURCE").ok().filter(|v| !v.is_empty());

        Some(GraylogConfig {
            host,
            port,
            use_tls,
            insecure_skip_verify,
            connect_timeout_seconds,
            source,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not in `host:port` form
    /// - the aggregator block has a zero port or timeout
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref graylog) = self.graylog {
            if graylog.host.is_empty() {
                anyhow::bail!("GRAYLOG_HOST must not be empty");
            }
            if graylog.port == 0 {
                anyhow::bail!("GRAYLOG_PORT must be greater than 0");
            }
            if graylog.connect_timeout_seconds == 0 {
                anyhow::bail!("GRAYLOG_CONNECT_TIMEOUT must be greater than 0");
            }
        }

        Ok(())
    }

    /// Returns whether remote log shipping is enabled.
    pub fn is_remote_enabled(&self) -> bool {
        self.graylog.is_some()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if let Some(ref graylog) = self.graylog {
            tracing::info!(
                "  Aggregator: {}:{} (tls: {})",
                graylog.host,
                graylog.port,
                graylog.use_tls
            );
        } else {
            tracing::info!("  Aggregator: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

impl GraylogConfig {
    /// Builds the transport construction settings for this aggregator.
    pub fn transport_config(&self) -> TransportConfig {
        let mut config = TransportConfig::new(self.host.clone(), self.port);
        config.use_tls = self.use_tls;
        config.insecure_skip_verify = self.insecure_skip_verify;
        config.connect_timeout = Duration::from_secs(self.connect_timeout_seconds);
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        config
    }

    /// `host:port` form used in log messages.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
