//! Fixed-point amounts in the store currency.
//!
//! Every amount is an integer count of fils, the minor unit of the Bahraini dinar.

use rust_decimal::Decimal;

/// ISO 4217 code of the only currency the store trades in.
pub const CURRENCY: &str = "BHD";

/// Decimal places of [`CURRENCY`].
pub const CURRENCY_SCALE: u32 = 3;

/// Minor units per major unit of [`CURRENCY`].
pub const MINOR_UNITS: u64 = 1_000;

/// Render an amount as `12.345 BHD`.
#[must_use]
pub fn format_amount(amount: u64) -> String {
    format!("{} {CURRENCY}", to_decimal(amount))
}

/// Convert a minor-unit amount into a decimal with the currency scale.
#[must_use]
pub fn to_decimal(amount: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(amount), CURRENCY_SCALE)
}
