//! Outbound email for the contact funnel.
//!
//! - [`Mailer`] -- the delivery seam; [`SmtpMailer`] sends via `lettre`,
//!   [`DisabledMailer`] logs and drops when SMTP is not configured.
//! - [`templates`] -- plain-text messages sent after a contact submission.

pub mod templates;

mod smtp;

pub use smtp::{EmailConfig, SmtpMailer};

use async_trait::async_trait;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// A fully rendered plain-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Delivers rendered messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError>;
}

/// Mailer used when `SMTP_HOST` is unset. Every message is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        tracing::debug!(
            to = %email.to,
            subject = %email.subject,
            "SMTP not configured, email skipped"
        );
        Ok(())
    }
}
