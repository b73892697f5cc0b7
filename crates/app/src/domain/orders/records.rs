//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        catalog::{
            ItemSnapshot,
            records::{ProductUuid, VariantUuid},
        },
        orders::status::OrderStatus,
        pricing::{self, PricingError},
        users::records::{ShippingAddress, UserUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    CashOnDelivery,
    BankTransfer,

    /// Hosted card payment through the Tap gateway.
    Gateway,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::BankTransfer => "bank",
            Self::Gateway => "tap",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on delivery",
            Self::BankTransfer => "Bank transfer",
            Self::Gateway => "Card (Tap)",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method \"{0}\"")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cod" => Ok(Self::CashOnDelivery),
            "bank" => Ok(Self::BankTransfer),
            "tap" => Ok(Self::Gateway),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment status \"{0}\"")]
pub struct UnknownPaymentStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// Contact details copied from the user profile at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerSnapshot {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One entry of the append-only status log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub status: OrderStatus,
    pub note: Option<String>,
    pub at: Timestamp,
}

/// A line copied by value from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub snapshot: ItemSnapshot,
    pub price: u64,
    pub quantity: u32,
}

impl OrderItemRecord {
    /// Price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product does not fit in a `u64`.
    pub fn line_total(&self) -> Result<u64, PricingError> {
        pricing::line_total(self.price, self.quantity)
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub invoice_number: String,
    pub user_uuid: UserUuid,
    pub currency: String,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub customer: CustomerSnapshot,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
    pub items: Vec<OrderItemRecord>,
    pub status_history: Vec<StatusEvent>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    #[must_use]
    pub fn is_owned_by(&self, user: UserUuid) -> bool {
        self.user_uuid == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_methods_use_short_wire_names() {
        assert_eq!("cod".parse(), Ok(PaymentMethod::CashOnDelivery));
        assert_eq!("bank".parse(), Ok(PaymentMethod::BankTransfer));
        assert_eq!("tap".parse(), Ok(PaymentMethod::Gateway));
        assert_eq!(
            "crypto".parse::<PaymentMethod>(),
            Err(UnknownPaymentMethod("crypto".to_string()))
        );
    }

    #[test]
    fn new_orders_start_unpaid() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }
}
