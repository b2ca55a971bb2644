//! Sink that ships records to a remote aggregator over a transport handle.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::record::{Field, LogRecord, Severity};
use super::service::LogSink;
use crate::transport::{Transport, TransportError};

/// Ships each record over the wrapped [`Transport`], best-effort.
///
/// Send failures are logged locally and never propagate to the request
/// being observed. There is no retry, batching, or buffering: a record
/// that fails to send is dropped.
///
/// The transport is serialized behind a mutex; the handle itself is
/// single-connection and not safe for interleaved writes.
pub struct RemoteSink {
    transport: Mutex<Box<dyn Transport>>,
}

impl RemoteSink {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport: Mutex::new(transport),
        }
    }

    /// Closes the underlying transport. Call once during orderly shutdown.
    pub async fn close(&self) -> Result<(), TransportError> {
        self.transport.lock().await.close().await
    }

    async fn ship(&self, severity: Severity, message: &str, fields: &[Field]) {
        let record = LogRecord {
            severity,
            message: message.to_string(),
            fields: fields.to_vec(),
        };

        if let Err(e) = self.transport.lock().await.send(&record).await {
            warn!("Failed to ship log record to remote aggregator: {}", e);
        }
    }
}

#[async_trait]
impl LogSink for RemoteSink {
    async fn info(&self, message: &str, fields: &[Field]) {
        self.ship(Severity::Info, message, fields).await;
    }

    async fn warn(&self, message: &str, fields: &[Field]) {
        self.ship(Severity::Warn, message, fields).await;
    }

    async fn error(&self, message: &str, fields: &[Field]) {
        self.ship(Severity::Error, message, fields).await;
    }
}
