//! Outbound message type.

/// A plain-text email handed to an [`EmailTransport`](crate::EmailTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// RFC 5322 "From" address.
    pub from: String,
    /// Recipient addresses; must be non-empty by the time a transport sees it.
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    /// Optional "Reply-To" address.
    pub reply_to: Option<String>,
}
