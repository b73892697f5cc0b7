//! Order Data

use crate::domain::{
    orders::{
        records::{CustomerSnapshot, OrderItemRecord, OrderUuid, PaymentMethod},
        status::OrderStatus,
    },
    pricing::Totals,
    users::records::{ShippingAddress, UserUuid},
};

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckout {
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
}

/// Admin status update. An omitted status keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusUpdate {
    pub status: Option<OrderStatus>,
    pub note: Option<String>,
}

/// Everything needed to persist an order, assembled during checkout.
#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub uuid: OrderUuid,
    pub invoice_number: String,
    pub user_uuid: UserUuid,
    pub totals: Totals,
    pub payment_method: PaymentMethod,
    pub customer: CustomerSnapshot,
    pub shipping_address: ShippingAddress,
    pub notes: Option<String>,
    pub items: Vec<OrderItemRecord>,
}
