#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqlog::sink::{Field, LogSink, Severity};
use reqlog::state::AppState;

/// One captured emission: channel, summary message, and full field list.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub severity: Severity,
    pub message: String,
    pub fields: Vec<Field>,
}

impl RecordedCall {
    /// Looks up a field value by key, if present.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Field keys in emission order.
    pub fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.key.clone()).collect()
    }
}

/// Sink that records every emission for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, severity: Severity, message: &str, fields: &[Field]) {
        self.calls.lock().unwrap().push(RecordedCall {
            severity,
            message: message.to_string(),
            fields: fields.to_vec(),
        });
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn info(&self, message: &str, fields: &[Field]) {
        self.record(Severity::Info, message, fields);
    }

    async fn warn(&self, message: &str, fields: &[Field]) {
        self.record(Severity::Warn, message, fields);
    }

    async fn error(&self, message: &str, fields: &[Field]) {
        self.record(Severity::Error, message, fields);
    }
}

pub fn create_test_state() -> (AppState, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let state = AppState::new(sink.clone());
    (state, sink)
}
