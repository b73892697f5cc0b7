//! Cart Data

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// Add-or-replace request for a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub size: Option<String>,
    pub quantity: u32,
}
