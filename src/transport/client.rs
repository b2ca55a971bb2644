//! Transport trait, configuration, and error types.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::sink::LogRecord;

/// Errors surfaced by transport construction and use.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tls error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("connect to {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// An opaque, closable sender of [`LogRecord`]s to a remote aggregator.
///
/// Handles are single-connection: `send` takes `&mut self` and callers that
/// share a handle across tasks must serialize access (see
/// [`crate::sink::RemoteSink`]). `close` releases the connection; sending
/// after close surfaces the underlying I/O error, it is not guarded here.
///
/// # Implementations
///
/// - [`crate::transport::TcpTransport`] - TCP (optionally TLS) to a GELF input
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one record. No retry: a failed send is reported and dropped.
    async fn send(&mut self, record: &LogRecord) -> Result<(), TransportError>;

    /// Releases the connection. Call once during orderly shutdown.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Configuration for constructing a transport handle.
///
/// The `mock` seam is test-only: when present, [`crate::transport::build`]
/// returns the pre-built outcome without touching the network, regardless
/// of the other fields' validity.
pub struct TransportConfig {
    /// Aggregator hostname or IP address.
    pub address: String,
    /// Aggregator TCP port.
    pub port: u16,
    /// Wrap the connection in TLS.
    pub use_tls: bool,
    /// Skip certificate and hostname verification during the TLS handshake.
    pub insecure_skip_verify: bool,
    /// Connect timeout. Only applied on the TLS path; the plain path
    /// ignores it.
    pub connect_timeout: Duration,
    /// Source host name reported in every shipped record.
    pub source: String,
    /// Pre-built construction outcome substituted for real construction.
    pub mock: Option<Result<Box<dyn Transport>, TransportError>>,
}

impl TransportConfig {
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            use_tls: false,
            insecure_skip_verify: false,
            connect_timeout: Duration::from_secs(3),
            source: env!("CARGO_PKG_NAME").to_string(),
            mock: None,
        }
    }

    /// Installs a pre-built outcome, short-circuiting real construction.
    pub fn with_mock(mut self, outcome: Result<Box<dyn Transport>, TransportError>) -> Self {
        self.mock = Some(outcome);
        self
    }

    /// `host:port` form used in log and error messages.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("connect_timeout", &self.connect_timeout)
            .field("source", &self.source)
            .field("mock", &self.mock.is_some())
            .finish()
    }
}
