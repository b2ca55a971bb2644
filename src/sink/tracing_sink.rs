//! Local sink emitting through `tracing`.

use async_trait::async_trait;

use super::record::{Field, format_fields};
use super::service::LogSink;

/// Emits records to the process-local `tracing` subscriber.
///
/// The field list is rendered as `key=value` pairs so both the text and
/// JSON formatters carry the full record.
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSink for TracingSink {
    async fn info(&self, message: &str, fields: &[Field]) {
        tracing::info!(target: "access", fields = %format_fields(fields), "{message}");
    }

    async fn warn(&self, message: &str, fields: &[Field]) {
        tracing::warn!(target: "access", fields = %format_fields(fields), "{message}");
    }

    async fn error(&self, message: &str, fields: &[Field]) {
        tracing::error!(target: "access", fields = %format_fields(fields), "{message}");
    }
}
