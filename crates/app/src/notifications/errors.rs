//! Mailer errors.

use lettre::transport::smtp::Error as SmtpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail is not configured")]
    NotConfigured,

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP error")]
    Smtp(#[from] SmtpError),

    #[error("SMTP send timed out after {0:?}")]
    Timeout(std::time::Duration),
}
