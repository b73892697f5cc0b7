//! Mail Config

use std::time::Duration;

use clap::Args;

use souq_app::{context::MailSettings, notifications::MailConfig};

/// SMTP and order notification settings. Every field is optional; mail stays
/// disabled until host, port, user, password and sender are all present.
#[derive(Debug, Args)]
pub struct MailSettingsConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP port (465 for implicit TLS, anything else negotiates STARTTLS)
    #[arg(long, env = "SMTP_PORT")]
    pub smtp_port: Option<u16>,

    /// SMTP username
    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    /// Sender address for outgoing mail
    #[arg(long, env = "SMTP_FROM")]
    pub smtp_from: Option<String>,

    /// Recipient of new-order mail. Defaults to the sender address.
    #[arg(long, env = "ORDER_NOTIFY_EMAIL")]
    pub order_notify_email: Option<String>,

    /// Upper bound on a single SMTP delivery.
    #[arg(long, env = "SMTP_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub smtp_timeout_seconds: u64,
}

impl MailSettingsConfig {
    /// Settings handed to the application context.
    #[must_use]
    pub fn settings(&self) -> MailSettings {
        MailSettings {
            smtp: self.smtp(),
            notify_email: self
                .order_notify_email
                .clone()
                .filter(|email| !email.trim().is_empty()),
        }
    }

    fn smtp(&self) -> Option<MailConfig> {
        Some(MailConfig {
            host: non_empty(self.smtp_host.as_ref())?,
            port: self.smtp_port?,
            username: non_empty(self.smtp_user.as_ref())?,
            password: non_empty(self.smtp_pass.as_ref())?,
            from: non_empty(self.smtp_from.as_ref())?,
            timeout: Duration::from_secs(self.smtp_timeout_seconds),
        })
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> MailSettingsConfig {
        MailSettingsConfig {
            smtp_host: Some("smtp.example.com".to_string()),
            smtp_port: Some(587),
            smtp_user: Some("shop".to_string()),
            smtp_pass: Some("secret".to_string()),
            smtp_from: Some("shop@example.com".to_string()),
            order_notify_email: None,
            smtp_timeout_seconds: 5,
        }
    }

    #[test]
    fn complete_settings_enable_smtp() {
        let settings = complete().settings();

        let smtp = settings.smtp.as_ref().map(|smtp| (smtp.port, smtp.timeout));

        assert_eq!(smtp, Some((587, Duration::from_secs(5))));
        assert_eq!(settings.notify_email, None);
    }

    #[test]
    fn any_missing_value_disables_smtp() {
        let without_pass = MailSettingsConfig {
            smtp_pass: None,
            ..complete()
        };
        let blank_host = MailSettingsConfig {
            smtp_host: Some("  ".to_string()),
            ..complete()
        };
        let without_port = MailSettingsConfig {
            smtp_port: None,
            ..complete()
        };

        assert!(without_pass.settings().smtp.is_none(), "missing password");
        assert!(blank_host.settings().smtp.is_none(), "blank host");
        assert!(without_port.settings().smtp.is_none(), "missing port");
    }

    #[test]
    fn notify_email_is_passed_through() {
        let config = MailSettingsConfig {
            order_notify_email: Some("orders@example.com".to_string()),
            ..complete()
        };

        assert_eq!(
            config.settings().notify_email.as_deref(),
            Some("orders@example.com")
        );
    }
}
