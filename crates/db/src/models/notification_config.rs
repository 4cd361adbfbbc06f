//! Singleton notification configuration entity.

use serde::Serialize;
use sqlx::FromRow;

/// The operator-supplied email configuration consumed by every dispatch.
///
/// A single row (`id = 1`), replaced wholesale by the configuration
/// endpoint. Addresses are validated before they reach the table, but
/// [`NotificationConfig::is_usable`] re-checks shape so a partially written
/// or legacy row can never route a dispatch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationConfig {
    pub sender: String,
    pub recipients: Vec<String>,
}

impl NotificationConfig {
    /// Whether this config can actually address an email.
    pub fn is_usable(&self) -> bool {
        !self.sender.trim().is_empty() && !self.recipients.is_empty()
    }
}
