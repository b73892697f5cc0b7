//! Invoice numbers.
//!
//! Numbers look like `LTE-20261014-7QX2M`. The generator makes collisions unlikely;
//! the unique constraint on `orders.invoice_number` is what rules them out.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use mockall::automock;
use rand::Rng;

/// Prefix of every invoice number.
pub const INVOICE_PREFIX: &str = "LTE";

/// Length of the random part.
pub const SUFFIX_LEN: usize = 5;

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[automock]
pub trait InvoiceNumberGenerator: Send + Sync {
    /// Produce a candidate invoice number.
    fn generate(&self) -> String;
}

/// Date-stamped generator with a random suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInvoiceNumbers;

impl InvoiceNumberGenerator for RandomInvoiceNumbers {
    fn generate(&self) -> String {
        let today = Timestamp::now().to_zoned(TimeZone::UTC).date();

        format_invoice_number(today, &random_suffix(&mut rand::thread_rng()))
    }
}

/// Join prefix, date stamp and suffix.
#[must_use]
pub fn format_invoice_number(date: Date, suffix: &str) -> String {
    format!(
        "{INVOICE_PREFIX}-{:04}{:02}{:02}-{suffix}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Draw [`SUFFIX_LEN`] characters from `[0-9A-Z]`.
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| {
            let index = rng.gen_range(0..SUFFIX_ALPHABET.len());

            SUFFIX_ALPHABET
                .get(index)
                .copied()
                .map_or('0', char::from)
        })
        .collect()
}
