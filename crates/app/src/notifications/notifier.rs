//! Order notifications.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::orders::records::OrderRecord,
    invoices::InvoiceRenderer,
    notifications::{EmailAttachment, Mailer, OutboundEmail, order_subject, order_summary},
};

#[automock]
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Tell the operator about a new order. Never fails; problems are logged.
    async fn order_created(&self, order: &OrderRecord);
}

/// Mails a summary, with the invoice attached, to the operator address.
#[derive(Clone)]
pub struct EmailOrderNotifier {
    mailer: Arc<dyn Mailer>,
    invoices: Arc<dyn InvoiceRenderer>,
    recipient: Option<String>,
}

impl EmailOrderNotifier {
    /// `recipient` falls back to the mailer's sender when unset.
    #[must_use]
    pub fn new(
        mailer: Arc<dyn Mailer>,
        invoices: Arc<dyn InvoiceRenderer>,
        recipient: Option<String>,
    ) -> Self {
        Self {
            mailer,
            invoices,
            recipient,
        }
    }

    fn recipient(&self) -> Option<String> {
        self.recipient
            .clone()
            .filter(|to| !to.trim().is_empty())
            .or_else(|| self.mailer.sender())
    }

    fn attachments(&self, order: &OrderRecord) -> Vec<EmailAttachment> {
        match self.invoices.render(order) {
            Ok(body) => vec![EmailAttachment {
                filename: invoice_filename(&order.invoice_number),
                content_type: "application/pdf".to_string(),
                body,
            }],
            Err(error) => {
                warn!(
                    %error,
                    invoice_number = %order.invoice_number,
                    "invoice rendering failed, sending summary without attachment"
                );

                Vec::new()
            }
        }
    }
}

#[async_trait]
impl OrderNotifier for EmailOrderNotifier {
    async fn order_created(&self, order: &OrderRecord) {
        if !self.mailer.is_configured() {
            info!(invoice_number = %order.invoice_number, "order mail skipped, SMTP not configured");
            return;
        }

        let Some(to) = self.recipient() else {
            info!(invoice_number = %order.invoice_number, "order mail skipped, no recipient");
            return;
        };

        let email = OutboundEmail {
            to,
            subject: order_subject(order),
            text: order_summary(order),
            attachments: self.attachments(order),
        };

        if let Err(error) = self.mailer.send(email).await {
            warn!(%error, invoice_number = %order.invoice_number, "failed to send order mail");
        }
    }
}

/// Download and attachment name of an invoice.
#[must_use]
pub fn invoice_filename(invoice_number: &str) -> String {
    format!("invoice-{invoice_number}.pdf")
}
