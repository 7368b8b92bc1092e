//! Completion gateway port
//!
//! Defines the interface for the model-completion provider: one ordered
//! message list in, one assistant message text out. Implementations
//! (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use clarity_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during completion gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_) | GatewayError::RateLimited | GatewayError::Timeout
        )
    }
}

/// Gateway for single-shot model completion
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send the assembled message list and return the assistant reply text.
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GatewayError::RateLimited.is_transient());
        assert!(GatewayError::Timeout.is_transient());
        assert!(GatewayError::ConnectionError("reset".into()).is_transient());
        assert!(!GatewayError::InvalidRequest("bad role".into()).is_transient());
        assert!(!GatewayError::RequestFailed("500".into()).is_transient());
    }
}
