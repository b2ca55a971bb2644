//! Fan-out sink that dispatches to multiple backends.
//!
//! Used to combine local tracing output with a remote aggregator.

use std::sync::Arc;

use async_trait::async_trait;

use super::record::Field;
use super::service::LogSink;

/// Dispatches every emission to all inner sinks, in order.
pub struct MultiSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl MultiSink {
    /// Create from a list of sinks. If the list is empty the result behaves
    /// like a noop.
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

#[async_trait]
impl LogSink for MultiSink {
    async fn info(&self, message: &str, fields: &[Field]) {
        for sink in &self.sinks {
            sink.info(message, fields).await;
        }
    }

    async fn warn(&self, message: &str, fields: &[Field]) {
        for sink in &self.sinks {
            sink.warn(message, fields).await;
        }
    }

    async fn error(&self, message: &str, fields: &[Field]) {
        for sink in &self.sinks {
            sink.error(message, fields).await;
        }
    }
}
