use std::sync::Arc;

use crate::sink::LogSink;

/// Shared application state injected into handlers and middleware.
///
/// The log sink is an explicit capability rather than ambient global
/// state, so tests can substitute a recording sink.
#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<dyn LogSink>,
}

impl AppState {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}
