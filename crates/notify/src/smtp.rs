//! SMTP transport implementation via lettre.
//!
//! Configuration is loaded from environment variables; if `SMTP_HOST` is not
//! set, [`SmtpConfig::from_env`] returns `None` and the server refuses to
//! start, since notification dispatch is the point of this service.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::message::OutboundEmail;
use crate::transport::{EmailTransport, TransportError};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

// ---------------------------------------------------------------------------
// SmtpConfig
// ---------------------------------------------------------------------------

/// Configuration for the SMTP transport.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (defaults to 587).
    pub port: u16,
    /// Optional SMTP username.
    pub user: Option<String>,
    /// Optional SMTP password.
    pub password: Option<String>,
}

impl SmtpConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default |
    /// |-----------------|----------|---------|
    /// | `SMTP_HOST`     | yes      | —       |
    /// | `SMTP_PORT`     | no       | `587`   |
    /// | `SMTP_USER`     | no       | —       |
    /// | `SMTP_PASSWORD` | no       | —       |
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends notification emails over async SMTP.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Assemble the MIME message.
    ///
    /// Address parse and build failures are permanent: the same input will
    /// fail the same way on every attempt.
    fn build_message(email: &OutboundEmail) -> Result<Message, TransportError> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|e| TransportError::Permanent(format!("Invalid from address: {e}")))?;

        let mut builder = Message::builder().from(from).subject(email.subject.clone());

        if let Some(reply_to) = &email.reply_to {
            let mailbox: Mailbox = reply_to
                .parse()
                .map_err(|e| TransportError::Permanent(format!("Invalid reply-to address: {e}")))?;
            builder = builder.reply_to(mailbox);
        }

        for recipient in &email.to {
            let mailbox: Mailbox = recipient
                .parse()
                .map_err(|e| TransportError::Permanent(format!("Invalid recipient address: {e}")))?;
            builder = builder.to(mailbox);
        }

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| TransportError::Permanent(format!("Message build error: {e}")))
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, TransportError> {
        let message = Self::build_message(email)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
                .map_err(|e| TransportError::Transient(e.to_string()))?
                .port(self.config.port);

        if let (Some(user), Some(pass)) = (&self.config.user, &self.config.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(message).await.map_err(|e| {
            if e.is_permanent() {
                TransportError::Permanent(e.to_string())
            } else {
                TransportError::Transient(e.to_string())
            }
        })?;

        // SMTP has no provider-assigned id; mint one for traceability.
        let delivery_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(
            to = ?email.to,
            subject = %email.subject,
            delivery_id = %delivery_id,
            "Notification email accepted by SMTP relay"
        );
        Ok(delivery_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
