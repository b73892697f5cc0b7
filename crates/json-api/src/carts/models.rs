//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq_app::domain::{
    carts::records::{CartItemRecord, CartRecord},
    catalog::{ItemSnapshot, records::Spec},
    pricing::{self, PricingError},
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals, in fils
    pub subtotal: u64,

    pub updated_at: String,
}

impl TryFrom<CartRecord> for CartResponse {
    type Error = PricingError;

    fn try_from(cart: CartRecord) -> Result<Self, Self::Error> {
        let subtotal = cart.subtotal()?;

        Ok(Self {
            uuid: cart.uuid.into(),
            items: cart
                .items
                .into_iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<_, _>>()?,
            subtotal,
            updated_at: cart.updated_at.to_string(),
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,

    /// Catalog details frozen when the line was added
    pub snapshot: SnapshotResponse,

    /// Unit price frozen when the line was added, in fils
    pub price: u64,

    pub quantity: u32,
    pub line_total: u64,
}

impl TryFrom<CartItemRecord> for CartItemResponse {
    type Error = PricingError;

    fn try_from(item: CartItemRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: item.uuid.into(),
            product_id: item.product_uuid.into(),
            variant_id: item.variant_uuid.map(Into::into),
            snapshot: item.snapshot.into(),
            price: item.price,
            quantity: item.quantity,
            line_total: pricing::line_total(item.price, item.quantity)?,
        })
    }
}

/// Descriptive fields copied from the catalog. Shared by cart and order lines.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnapshotResponse {
    pub name: String,
    pub sku: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub specs: Vec<SpecResponse>,
}

impl From<ItemSnapshot> for SnapshotResponse {
    fn from(snapshot: ItemSnapshot) -> Self {
        Self {
            name: snapshot.name,
            sku: snapshot.sku,
            size: snapshot.size,
            image: snapshot.image,
            specs: snapshot.specs.into_iter().map(SpecResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SpecResponse {
    pub label: String,
    pub value: String,
}

impl From<Spec> for SpecResponse {
    fn from(spec: Spec) -> Self {
        Self {
            label: spec.label,
            value: spec.value,
        }
    }
}
