//! Mail transport.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use mockall::automock;
use tracing::info;

use crate::notifications::MailerError;

/// Implicit TLS port; any other port negotiates STARTTLS.
const SMTPS_PORT: u16 = 465;

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub timeout: Duration,
}

/// A file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachments: Vec<EmailAttachment>,
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Whether messages can actually be delivered.
    fn is_configured(&self) -> bool;

    /// The configured sender address, if any.
    fn sender(&self) -> Option<String>;

    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError>;
}

/// SMTP delivery through lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    timeout: Duration,
}

impl SmtpMailer {
    /// Build a transport from configuration. No connection is made until the first
    /// send.
    ///
    /// # Errors
    ///
    /// Returns an error if the sender address or relay host is invalid.
    pub fn new(config: &MailConfig) -> Result<Self, MailerError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|_| MailerError::InvalidAddress(config.from.clone()))?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            transport,
            from,
            timeout: config.timeout,
        })
    }

    fn build_message(&self, email: OutboundEmail) -> Result<Message, MailerError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|_| MailerError::InvalidAddress(email.to.clone()))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject);

        let text = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(email.text);

        if email.attachments.is_empty() {
            return Ok(builder.singlepart(text)?);
        }

        let mut body = MultiPart::mixed().singlepart(text);

        for attachment in email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .unwrap_or(ContentType::TEXT_PLAIN);

            body = body.singlepart(
                Attachment::new(attachment.filename).body(attachment.body, content_type),
            );
        }

        Ok(builder.multipart(body)?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn is_configured(&self) -> bool {
        true
    }

    fn sender(&self) -> Option<String> {
        Some(self.from.email.to_string())
    }

    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
        let message = self.build_message(email)?;

        tokio::time::timeout(self.timeout, self.transport.send(message))
            .await
            .map_err(|_| MailerError::Timeout(self.timeout))??;

        Ok(())
    }
}

/// Stand-in used when SMTP settings are incomplete.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    fn is_configured(&self) -> bool {
        false
    }

    fn sender(&self) -> Option<String> {
        None
    }

    async fn send(&self, email: OutboundEmail) -> Result<(), MailerError> {
        info!(subject = %email.subject, "email not sent, SMTP not configured");

        Err(MailerError::NotConfigured)
    }
}
