//! Pricing engine
//!
//! Pure functions over minor-unit amounts. Nothing here touches storage, so the
//! same rules apply to carts on display and to orders at checkout.

use thiserror::Error;

use crate::money::MINOR_UNITS;

/// Orders below this subtotal pay [`FLAT_SHIPPING_FEE`].
pub const FREE_SHIPPING_THRESHOLD: u64 = 10 * MINOR_UNITS;

/// Shipping fee charged below [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING_FEE: u64 = MINOR_UNITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("amount overflow")]
    Overflow,
}

/// Subtotal, shipping and grand total of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,
}

impl Totals {
    /// Price a set of `(unit price, quantity)` lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if an amount does not fit in a `u64`.
    pub fn for_lines<I>(lines: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = (u64, u32)>,
    {
        Self::from_subtotal(subtotal(lines)?)
    }

    /// Add shipping to a subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in a `u64`.
    pub fn from_subtotal(subtotal: u64) -> Result<Self, PricingError> {
        let shipping_fee = shipping_fee(subtotal);

        Ok(Self {
            subtotal,
            shipping_fee,
            total: subtotal
                .checked_add(shipping_fee)
                .ok_or(PricingError::Overflow)?,
        })
    }
}

/// Unit price of a line: the size price if positive, else the variant price if
/// positive, else the product base price, else zero.
#[must_use]
pub fn unit_price(size: Option<u64>, variant: Option<u64>, base: Option<u64>) -> u64 {
    size.filter(|price| *price > 0)
        .or_else(|| variant.filter(|price| *price > 0))
        .or(base)
        .unwrap_or(0)
}

/// Price times quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in a `u64`.
pub fn line_total(price: u64, quantity: u32) -> Result<u64, PricingError> {
    price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Sum of line totals.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in a `u64`.
pub fn subtotal<I>(lines: I) -> Result<u64, PricingError>
where
    I: IntoIterator<Item = (u64, u32)>,
{
    lines.into_iter().try_fold(0_u64, |sum, (price, quantity)| {
        sum.checked_add(line_total(price, quantity)?)
            .ok_or(PricingError::Overflow)
    })
}

/// Flat fee below the free-shipping threshold, otherwise nothing.
#[must_use]
pub const fn shipping_fee(subtotal: u64) -> u64 {
    if subtotal < FREE_SHIPPING_THRESHOLD {
        FLAT_SHIPPING_FEE
    } else {
        0
    }
}
