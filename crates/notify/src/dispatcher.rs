//! Retrying email dispatch with pre-flight validation.
//!
//! The dispatcher owns delivery *policy* (validate, retry, back off); the
//! wire protocol lives behind [`EmailTransport`]. Failed attempts on
//! transient errors are retried with increasing backoff; permanent errors
//! surface on the first attempt. Delays use `tokio::time::sleep`, so
//! dropping the enclosing request future cancels any pending retry.

use std::sync::Arc;
use std::time::Duration;

use vigil_core::error::CoreError;
use vigil_core::validation::validate_email_address;

use crate::message::OutboundEmail;
use crate::transport::{EmailTransport, TransportError};

/// Delays between send attempts (3 attempts total).
const RETRY_DELAYS: [Duration; 2] = [Duration::from_millis(500), Duration::from_millis(1500)];

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a dispatch that did not produce a delivery.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The message failed pre-flight validation; no transport call was made.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The transport rejected the message (after retries, if transient).
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Successful dispatch outcome.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    /// Transport-reported delivery id.
    pub delivery_id: String,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Validates and sends outbound email through an [`EmailTransport`].
pub struct Dispatcher {
    transport: Arc<dyn EmailTransport>,
}

impl Dispatcher {
    /// Create a dispatcher over the given transport.
    pub fn new(transport: Arc<dyn EmailTransport>) -> Self {
        Self { transport }
    }

    /// Send an email, retrying transient failures.
    ///
    /// Validates sender and recipient address shape before any network
    /// activity. Up to three attempts; only [`TransportError::Transient`]
    /// failures are retried.
    pub async fn dispatch(&self, email: &OutboundEmail) -> Result<DispatchReceipt, DispatchError> {
        validate(email)?;

        for (attempt, delay) in RETRY_DELAYS.iter().enumerate() {
            match self.transport.send(email).await {
                Ok(delivery_id) => return Ok(DispatchReceipt { delivery_id }),
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        error = %e,
                        "Email dispatch attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Final attempt after the last backoff.
        match self.transport.send(email).await {
            Ok(delivery_id) => Ok(DispatchReceipt { delivery_id }),
            Err(e) => {
                tracing::error!(error = %e, "Email dispatch failed after all retries");
                Err(e.into())
            }
        }
    }
}

/// Pre-flight address checks; failures are surfaced without any send.
fn validate(email: &OutboundEmail) -> Result<(), CoreError> {
    validate_email_address(&email.from, "sender")?;
    if email.to.is_empty() {
        return Err(CoreError::Validation(
            "At least one recipient is required".to_string(),
        ));
    }
    for recipient in &email.to {
        validate_email_address(recipient, "recipient")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
