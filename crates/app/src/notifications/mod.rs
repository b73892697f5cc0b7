//! Outbound mail and order notifications.

mod errors;
mod mailer;
mod notifier;
mod summary;

pub use errors::MailerError;
pub use mailer::*;
pub use notifier::*;
pub use summary::{order_summary, order_subject};
