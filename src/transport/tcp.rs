//! TCP (optionally TLS) transport shipping GELF frames to a remote input.

use chrono::Utc;
use serde_json::{Map, Value, json};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_native_tls::TlsStream;

use async_trait::async_trait;

use super::client::{Transport, TransportConfig, TransportError};
use crate::sink::LogRecord;

/// Active stream to the aggregator.
enum Stream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Stream {
    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        match self {
            Stream::Plain(stream) => stream.write_all(buf).await,
            Stream::Tls(stream) => stream.write_all(buf).await,
        }
    }

    async fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Stream::Plain(stream) => stream.flush().await,
            Stream::Tls(stream) => stream.flush().await,
        }
    }

    async fn shutdown(&mut self) -> std::io::Result<()> {
        match self {
            Stream::Plain(stream) => stream.shutdown().await,
            Stream::Tls(stream) => stream.shutdown().await,
        }
    }
}

/// Stream transport to a GELF TCP input.
///
/// Each record becomes one NUL-terminated JSON frame, the framing the
/// Graylog TCP input expects.
pub struct TcpTransport {
    stream: Stream,
    source: String,
}

impl TcpTransport {
    /// Connects without TLS. The configured connect timeout is not applied
    /// on this path.
    pub async fn connect(config: &TransportConfig) -> Result<Self, TransportError> {
        let stream = TcpStream::connect((config.address.as_str(), config.port)).await?;

        Ok(Self {
            stream: Stream::Plain(stream),
            source: config.source.clone(),
        })
    }

    /// Connects and negotiates TLS within the configured connect timeout.
    ///
    /// Certificate and hostname verification are skipped if and only if
    /// `config.insecure_skip_verify` is set.
    pub async fn connect_tls(config: &TransportConfig) -> Result<Self, TransportError> {
        let timed_out = || TransportError::ConnectTimeout {
            addr: config.endpoint(),
            timeout: config.connect_timeout,
        };

        let tcp = timeout(
            config.connect_timeout,
            TcpStream::connect((config.address.as_str(), config.port)),
        )
        .await
        .map_err(|_| timed_out())??;

        let mut builder = native_tls::TlsConnector::builder();
        if config.insecure_skip_verify {
            builder.danger_accept_invalid_certs(true);
            builder.danger_accept_invalid_hostnames(true);
        }
        let connector = tokio_native_tls::TlsConnector::from(builder.build()?);

        let stream = timeout(config.connect_timeout, connector.connect(&config.address, tcp))
            .await
            .map_err(|_| timed_out())??;

        Ok(Self {
            stream: Stream::Tls(Box::new(stream)),
            source: config.source.clone(),
        })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, record: &LogRecord) -> Result<(), TransportError> {
        let mut frame = encode_gelf(record, &self.source)?;
        frame.push(0);

        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

/// Encodes a record as a GELF 1.1 JSON document.
///
/// Structured fields are carried as additional fields with their keys
/// underscore-prefixed, the form dashboards index without transformation.
fn encode_gelf(record: &LogRecord, source: &str) -> Result<Vec<u8>, serde_json::Error> {
    let mut doc = Map::new();
    doc.insert("version".to_string(), json!("1.1"));
    doc.insert("host".to_string(), json!(source));
    doc.insert("short_message".to_string(), json!(record.message));
    doc.insert(
        "timestamp".to_string(),
        json!(Utc::now().timestamp_millis() as f64 / 1000.0),
    );
    doc.insert("level".to_string(), json!(record.severity.syslog_level()));

    for field in &record.fields {
        doc.insert(format!("_{}", field.key), Value::from(&field.value));
    }

    serde_json::to_vec(&Value::Object(doc))
}
