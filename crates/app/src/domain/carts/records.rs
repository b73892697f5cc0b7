//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        catalog::{
            ItemSnapshot,
            records::{ProductUuid, VariantUuid},
        },
        pricing::{self, PricingError},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line prices times quantities.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the sum does not fit in a `u64`.
    pub fn subtotal(&self) -> Result<u64, PricingError> {
        pricing::subtotal(self.items.iter().map(|item| (item.price, item.quantity)))
    }

    /// Find the line holding the given product, variant and size.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartItemRecord> {
        self.items.iter().find(|item| item.key() == *key)
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub snapshot: ItemSnapshot,
    pub price: u64,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product: self.product_uuid,
            variant: self.variant_uuid,
            size: self.snapshot.size.clone(),
        }
    }
}

/// What makes two cart lines the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product: ProductUuid,
    pub variant: Option<VariantUuid>,
    pub size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: ProductUuid, size: Option<&str>, price: u64, quantity: u32) -> CartItemRecord {
        CartItemRecord {
            uuid: CartItemUuid::new(),
            product_uuid: product,
            variant_uuid: None,
            snapshot: ItemSnapshot {
                name: "Ghutra".to_string(),
                sku: None,
                size: size.map(ToString::to_string),
                image: None,
                specs: Vec::new(),
            },
            price,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn cart(items: Vec<CartItemRecord>) -> CartRecord {
        CartRecord {
            uuid: CartUuid::new(),
            user_uuid: UserUuid::new(),
            items,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> Result<(), PricingError> {
        let product = ProductUuid::new();
        let cart = cart(vec![
            item(product, Some("S"), 2_500, 2),
            item(product, Some("M"), 1_000, 3),
        ]);

        assert_eq!(cart.subtotal()?, 8_000);

        Ok(())
    }

    #[test]
    fn line_lookup_distinguishes_sizes() {
        let product = ProductUuid::new();
        let small = item(product, Some("S"), 2_500, 1);
        let small_uuid = small.uuid;
        let cart = cart(vec![small, item(product, Some("M"), 2_500, 1)]);

        let key = LineKey {
            product,
            variant: None,
            size: Some("S".to_string()),
        };

        assert_eq!(cart.line(&key).map(|line| line.uuid), Some(small_uuid));

        let missing = LineKey {
            size: Some("L".to_string()),
            ..key
        };

        assert!(cart.line(&missing).is_none());
    }
}
