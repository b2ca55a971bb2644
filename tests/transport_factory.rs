use std::time::Duration;

use reqlog::sink::{Field, LogRecord, Severity};
use reqlog::transport::{self, Transport, TransportConfig};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

/// Reads one NUL-terminated frame from the accepted connection.
async fn accept_one_frame(listener: TcpListener) -> Vec<u8> {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut frame = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        let n = socket.read(&mut byte).await.unwrap();
        if n == 0 || byte[0] == 0 {
            break;
        }
        frame.push(byte[0]);
    }
    frame
}

#[tokio::test]
async fn test_plain_transport_ships_nul_terminated_gelf_frame() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let accept = tokio::spawn(accept_one_frame(listener));

    let mut config = TransportConfig::new("127.0.0.1", port);
    config.source = "edge-01".to_string();

    let mut handle = transport::build(config).await.unwrap();

    let record = LogRecord {
        severity: Severity::Error,
        message: "503 GET /broken (1.2.3.4) 1.25ms".to_string(),
        fields: vec![Field::i32("http.status_code", 503)],
    };
    handle.send(&record).await.unwrap();

    let frame = accept.await.unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&frame).unwrap();

    assert_eq!(doc["version"], "1.1");
    assert_eq!(doc["host"], "edge-01");
    assert_eq!(doc["short_message"], "503 GET /broken (1.2.3.4) 1.25ms");
    assert_eq!(doc["level"], 3);
    assert_eq!(doc["_http.status_code"], 503);

    handle.close().await.unwrap();
}

#[tokio::test]
async fn test_plain_construction_fails_when_endpoint_unreachable() {
    // Bind then drop to find a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = TransportConfig::new("127.0.0.1", port);
    assert!(transport::build(config).await.is_err());
}

#[tokio::test]
async fn test_tls_construction_fails_when_endpoint_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut config = TransportConfig::new("127.0.0.1", port);
    config.use_tls = true;
    config.insecure_skip_verify = true;
    config.connect_timeout = Duration::from_millis(500);

    assert!(transport::build(config).await.is_err());
}

#[tokio::test]
async fn test_tls_handshake_failure_surfaces_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // Accept and hang up without speaking TLS.
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        drop(socket);
    });

    let mut config = TransportConfig::new("127.0.0.1", port);
    config.use_tls = true;
    config.insecure_skip_verify = true;
    config.connect_timeout = Duration::from_millis(500);

    assert!(transport::build(config).await.is_err());
}

#[tokio::test]
async fn test_close_shuts_down_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let accept = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 16];
        socket.read(&mut buf).await.unwrap()
    });

    let mut handle = transport::build(TransportConfig::new("127.0.0.1", port))
        .await
        .unwrap();
    handle.close().await.unwrap();

    assert_eq!(accept.await.unwrap(), 0);
}
