//! Catalog Records

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// A label/value pair describing a product, such as material or fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub label: String,
    pub value: String,
}

/// One purchasable size of a product or variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub label: String,
    pub price: Option<u64>,
    pub out_of_stock: bool,
}

/// Variant Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<u64>,

    /// Flat stock count, for variants sold without sizes.
    pub stock: Option<u32>,

    pub specs: Vec<Spec>,
    pub is_active: bool,
    pub sizes: Vec<SizeOption>,
}

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub sku: Option<String>,
    pub image: Option<String>,
    pub base_price: Option<u64>,
    pub specs: Vec<Spec>,
    pub is_active: bool,

    /// Sizes offered when no variant is selected.
    pub sizes: Vec<SizeOption>,

    pub variants: Vec<VariantRecord>,
}
