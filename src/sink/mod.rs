//! Structured log records and the sinks they are emitted to.
//!
//! Provides a [`LogSink`] trait with three implementations:
//! - [`TracingSink`] - local output through `tracing`
//! - [`RemoteSink`] - ships records to a remote aggregator over a transport
//! - [`MultiSink`] - fan-out to several sinks

mod multi_sink;
mod record;
mod remote_sink;
mod service;
mod tracing_sink;

pub use multi_sink::MultiSink;
pub use record::{Field, FieldValue, LogRecord, Severity, format_fields};
pub use remote_sink::RemoteSink;
pub use service::LogSink;
pub use tracing_sink::TracingSink;

#[cfg(test)]
pub use service::MockLogSink;
