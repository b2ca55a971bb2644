//! Log sink trait: the capability the middleware emits through.

use async_trait::async_trait;

use super::record::Field;

/// Destination for structured log emissions, one operation per severity
/// channel.
///
/// The access-log middleware receives this capability through
/// [`crate::state::AppState`] rather than reading process-global logging
/// state, so tests can substitute a recording or mock sink.
///
/// Implementations must be thread-safe; emissions from concurrent requests
/// may interleave. A sink must never fail the request it is logging for:
/// backend errors are handled internally.
///
/// # Implementations
///
/// - [`crate::sink::TracingSink`] - local output through `tracing`
/// - [`crate::sink::RemoteSink`] - ships records to a remote aggregator
/// - [`crate::sink::MultiSink`] - fan-out to several sinks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Emits on the informational channel.
    async fn info(&self, message: &str, fields: &[Field]);

    /// Emits on the warning channel.
    async fn warn(&self, message: &str, fields: &[Field]);

    /// Emits on the error channel.
    async fn error(&self, message: &str, fields: &[Field]);
}
