//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq_app::domain::{
    orders::records::{OrderItemRecord, OrderRecord, StatusEvent},
    pricing::PricingError,
    users::records::ShippingAddress,
};

use crate::carts::models::SnapshotResponse;

/// Delivery address, as sent by clients and returned on orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressBody {
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Primary address line, required at checkout
    #[serde(default)]
    pub line1: String,

    #[serde(default)]
    pub line2: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        Self {
            full_name: body.full_name,
            phone: body.phone,
            line1: body.line1,
            line2: body.line2,
            city: body.city,
            country: body.country,
            postal_code: body.postal_code,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        Self {
            full_name: address.full_name,
            phone: address.phone,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusEventResponse {
    pub status: String,
    pub note: Option<String>,
    pub at: String,
}

impl From<StatusEvent> for StatusEventResponse {
    fn from(event: StatusEvent) -> Self {
        Self {
            status: event.status.to_string(),
            note: event.note,
            at: event.at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub snapshot: SnapshotResponse,
    pub price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl TryFrom<OrderItemRecord> for OrderItemResponse {
    type Error = PricingError;

    fn try_from(item: OrderItemRecord) -> Result<Self, Self::Error> {
        let line_total = item.line_total()?;

        Ok(Self {
            uuid: item.uuid.into(),
            product_id: item.product_uuid.into(),
            variant_id: item.variant_uuid.map(Into::into),
            snapshot: item.snapshot.into(),
            price: item.price,
            quantity: item.quantity,
            line_total,
        })
    }
}

/// Order Response
///
/// Amounts are integer fils of `currency`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub invoice_number: String,
    pub user_id: Uuid,
    pub currency: String,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,

    /// `cod`, `bank` or `tap`
    pub payment_method: String,

    pub payment_status: String,
    pub status: String,
    pub customer: CustomerResponse,
    pub shipping_address: ShippingAddressBody,
    pub notes: Option<String>,
    pub items: Vec<OrderItemResponse>,

    /// Every status the order has been in, oldest first
    pub status_history: Vec<StatusEventResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<OrderRecord> for OrderResponse {
    type Error = PricingError;

    fn try_from(order: OrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: order.uuid.into(),
            invoice_number: order.invoice_number,
            user_id: order.user_uuid.into(),
            currency: order.currency,
            subtotal: order.subtotal,
            shipping_fee: order.shipping_fee,
            total: order.total,
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            status: order.status.to_string(),
            customer: CustomerResponse {
                name: order.customer.name,
                email: order.customer.email,
                phone: order.customer.phone,
            },
            shipping_address: order.shipping_address.into(),
            notes: order.notes,
            items: order
                .items
                .into_iter()
                .map(OrderItemResponse::try_from)
                .collect::<Result<_, _>>()?,
            status_history: order
                .status_history
                .into_iter()
                .map(StatusEventResponse::from)
                .collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        })
    }
}

/// Convert a list of orders, failing on the first that cannot be priced.
pub(crate) fn order_responses(orders: Vec<OrderRecord>) -> Result<Vec<OrderResponse>, PricingError> {
    orders.into_iter().map(OrderResponse::try_from).collect()
}
