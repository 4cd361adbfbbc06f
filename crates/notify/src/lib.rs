//! Outbound notification dispatch for the vigil alert pipeline.
//!
//! Building blocks:
//!
//! - [`OutboundEmail`] -- the message handed to a transport.
//! - [`EmailTransport`] -- the seam between dispatch policy and the concrete
//!   channel; the pipeline depends only on its `send` contract.
//! - [`SmtpMailer`] -- production transport over lettre's async SMTP client.
//! - [`Dispatcher`] -- pre-flight validation plus retry with backoff on
//!   transient failures.

pub mod dispatcher;
pub mod message;
pub mod smtp;
pub mod transport;

pub use dispatcher::{DispatchError, DispatchReceipt, Dispatcher};
pub use message::OutboundEmail;
pub use smtp::{SmtpConfig, SmtpMailer};
pub use transport::{EmailTransport, TransportError};
