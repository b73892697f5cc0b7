//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService, RandomInvoiceNumbers},
    },
    invoices::{InvoiceRenderer, PdfInvoiceRenderer},
    notifications::{DisabledMailer, EmailOrderNotifier, MailConfig, Mailer, MailerError, SmtpMailer},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("invalid mail configuration")]
    Mailer(#[source] MailerError),
}

/// Mail settings as far as they were provided.
#[derive(Debug, Clone, Default)]
pub struct MailSettings {
    /// Complete SMTP settings, or `None` to run with mail disabled.
    pub smtp: Option<MailConfig>,

    /// Operator address for order mail. Falls back to the sender.
    pub notify_email: Option<String>,
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub invoices: Arc<dyn InvoiceRenderer>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or building the mail transport fails.
    pub async fn from_database_url(url: &str, mail: MailSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let mailer: Arc<dyn Mailer> = match &mail.smtp {
            Some(config) => {
                info!(host = %config.host, port = config.port, "SMTP mail enabled");
                Arc::new(SmtpMailer::new(config).map_err(AppInitError::Mailer)?)
            }
            None => {
                info!("SMTP settings incomplete, order mail disabled");
                Arc::new(DisabledMailer)
            }
        };

        let invoices: Arc<dyn InvoiceRenderer> = Arc::new(PdfInvoiceRenderer);

        let notifier = EmailOrderNotifier::new(mailer, Arc::clone(&invoices), mail.notify_email);

        let db = Db::new(pool.clone());

        Ok(Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db,
                Arc::new(RandomInvoiceNumbers),
                Arc::new(notifier),
            )),
            auth: Arc::new(PgAuthService::new(pool)),
            invoices,
        })
    }
}
