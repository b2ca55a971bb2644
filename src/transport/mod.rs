//! Transport construction for remote log shipping.
//!
//! [`build`] turns a [`TransportConfig`] into a ready [`Transport`] handle,
//! choosing between plain TCP, TLS, and a pre-built mock outcome.

mod client;
mod tcp;

pub use client::{Transport, TransportConfig, TransportError};
pub use tcp::TcpTransport;

#[cfg(test)]
pub use client::MockTransport;

/// Builds a transport handle from the given configuration.
///
/// A configured mock outcome is returned as-is, without touching the
/// network. Otherwise a TCP connection is established, wrapped in TLS
/// when `use_tls` is set.
pub async fn build(mut config: TransportConfig) -> Result<Box<dyn Transport>, TransportError> {
    if let Some(outcome) = config.mock.take() {
        return outcome;
    }

    if config.use_tls {
        return Ok(Box::new(TcpTransport::connect_tls(&config).await?));
    }

    Ok(Box::new(TcpTransport::connect(&config).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_returns_mock_handle_without_connecting() {
        // The address is not resolvable; a mock outcome must short-circuit
        // before any network activity.
        let config = TransportConfig::new("host.invalid", 12201)
            .with_mock(Ok(Box::new(MockTransport::new())));

        assert!(build(config).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_returns_mock_error_without_connecting() {
        let config = TransportConfig::new("host.invalid", 12201)
            .with_mock(Err(TransportError::Other("handshake refused".to_string())));

        let err = build(config).await.err().expect("mock error must surface");
        assert!(matches!(err, TransportError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_takes_precedence_over_tls_flag() {
        let mut config = TransportConfig::new("host.invalid", 12201)
            .with_mock(Ok(Box::new(MockTransport::new())));
        config.use_tls = true;

        assert!(build(config).await.is_ok());
    }
}
