//! The transport seam between dispatch policy and the concrete channel.

use async_trait::async_trait;

use crate::message::OutboundEmail;

/// Error type for a single transport send attempt.
///
/// The split decides retry behaviour: `Transient` failures may be retried by
/// the dispatcher, `Permanent` ones surface on the first attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network failure, timeout, or a retryable server response.
    #[error("Transient transport failure: {0}")]
    Transient(String),

    /// Authentication rejection or a malformed message; retrying cannot help.
    #[error("Permanent transport failure: {0}")]
    Permanent(String),
}

impl TransportError {
    /// Whether the dispatcher may retry after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, TransportError::Transient(_))
    }
}

/// An external channel that can deliver an [`OutboundEmail`].
///
/// Implementations return a delivery id on success. Authentication and
/// protocol details are entirely the implementation's concern.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<String, TransportError>;
}
