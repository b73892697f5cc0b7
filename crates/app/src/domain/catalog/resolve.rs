//! Selection resolution.

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::{
        errors::CatalogError,
        records::{ProductRecord, ProductUuid, SizeOption, Spec, VariantRecord, VariantUuid},
    },
    pricing,
};

/// Display fields frozen onto a cart line when it is added, then copied onto the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub sku: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub specs: Vec<Spec>,
}

/// A selection checked against the catalog and priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub product: ProductUuid,
    pub variant: Option<VariantUuid>,
    pub price: u64,
    pub snapshot: ItemSnapshot,
}

/// Check a selection against a product and price it.
///
/// # Errors
///
/// - [`CatalogError::ProductNotFound`] when the product is inactive.
/// - [`CatalogError::VariantNotFound`] / [`CatalogError::Inactive`] for a missing or
///   disabled variant.
/// - [`CatalogError::SizeRequired`] / [`CatalogError::SizeNotFound`] when the size label
///   does not pick exactly one of the applicable sizes.
/// - [`CatalogError::OutOfStock`] for a sold-out size or when the quantity exceeds the
///   variant's flat stock.
pub fn resolve_selection(
    product: &ProductRecord,
    variant: Option<VariantUuid>,
    size: Option<&str>,
    quantity: u32,
) -> Result<ResolvedLine, CatalogError> {
    if !product.is_active {
        return Err(CatalogError::ProductNotFound);
    }

    let variant = variant.map(|uuid| find_variant(product, uuid)).transpose()?;

    let sizes = variant.map_or(product.sizes.as_slice(), |variant| variant.sizes.as_slice());

    let size = select_size(sizes, size)?;

    if let Some(stock) = variant.and_then(|variant| variant.stock)
        && quantity > stock
    {
        return Err(CatalogError::OutOfStock);
    }

    let price = pricing::unit_price(
        size.and_then(|size| size.price),
        variant.and_then(|variant| variant.price),
        product.base_price,
    );

    let size_label = size
        .map(|size| size.label.clone())
        .or_else(|| variant.map(|variant| variant.name.clone()));

    let specs = variant
        .map(|variant| &variant.specs)
        .filter(|specs| !specs.is_empty())
        .unwrap_or(&product.specs)
        .clone();

    Ok(ResolvedLine {
        product: product.uuid,
        variant: variant.map(|variant| variant.uuid),
        price,
        snapshot: ItemSnapshot {
            name: product.name.clone(),
            sku: variant
                .and_then(|variant| variant.sku.clone())
                .or_else(|| product.sku.clone()),
            size: size_label,
            image: product.image.clone(),
            specs,
        },
    })
}

fn find_variant(product: &ProductRecord, uuid: VariantUuid) -> Result<&VariantRecord, CatalogError> {
    let variant = product
        .variants
        .iter()
        .find(|variant| variant.uuid == uuid)
        .ok_or(CatalogError::VariantNotFound)?;

    if !variant.is_active {
        return Err(CatalogError::Inactive);
    }

    Ok(variant)
}

fn select_size<'a>(
    sizes: &'a [SizeOption],
    requested: Option<&str>,
) -> Result<Option<&'a SizeOption>, CatalogError> {
    let requested = requested.map(str::trim).filter(|label| !label.is_empty());

    let Some(label) = requested else {
        return if sizes.is_empty() {
            Ok(None)
        } else {
            Err(CatalogError::SizeRequired)
        };
    };

    let mut matching = sizes.iter().filter(|size| size.label == label);

    let (Some(size), None) = (matching.next(), matching.next()) else {
        return Err(CatalogError::SizeNotFound);
    };

    if size.out_of_stock {
        return Err(CatalogError::OutOfStock);
    }

    Ok(Some(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(label: &str, price: Option<u64>, out_of_stock: bool) -> SizeOption {
        SizeOption {
            label: label.to_string(),
            price,
            out_of_stock,
        }
    }

    fn variant(name: &str) -> VariantRecord {
        VariantRecord {
            uuid: VariantUuid::new(),
            name: name.to_string(),
            sku: Some(format!("SKU-{name}")),
            price: None,
            stock: None,
            specs: Vec::new(),
            is_active: true,
            sizes: Vec::new(),
        }
    }

    fn product() -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            name: "Linen Thobe".to_string(),
            sku: Some("THOBE".to_string()),
            image: Some("/images/thobe.jpg".to_string()),
            base_price: Some(12_000),
            specs: vec![Spec {
                label: "Material".to_string(),
                value: "Linen".to_string(),
            }],
            is_active: true,
            sizes: Vec::new(),
            variants: Vec::new(),
        }
    }

    #[test]
    fn plain_product_uses_base_price_and_product_fields() -> Result<(), CatalogError> {
        let product = product();

        let line = resolve_selection(&product, None, None, 2)?;

        assert_eq!(line.price, 12_000);
        assert_eq!(line.variant, None);
        assert_eq!(line.snapshot.name, "Linen Thobe");
        assert_eq!(line.snapshot.sku.as_deref(), Some("THOBE"));
        assert_eq!(line.snapshot.size, None);
        assert_eq!(line.snapshot.specs, product.specs);

        Ok(())
    }

    #[test]
    fn inactive_product_is_not_found() {
        let mut product = product();
        product.is_active = false;

        let result = resolve_selection(&product, None, None, 1);

        assert!(
            matches!(result, Err(CatalogError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[test]
    fn unknown_variant_is_not_found() {
        let result = resolve_selection(&product(), Some(VariantUuid::new()), None, 1);

        assert!(
            matches!(result, Err(CatalogError::VariantNotFound)),
            "expected VariantNotFound, got {result:?}"
        );
    }

    #[test]
    fn disabled_variant_is_inactive() {
        let mut product = product();
        let mut disabled = variant("Navy");
        disabled.is_active = false;
        let uuid = disabled.uuid;
        product.variants.push(disabled);

        let result = resolve_selection(&product, Some(uuid), None, 1);

        assert!(
            matches!(result, Err(CatalogError::Inactive)),
            "expected Inactive, got {result:?}"
        );
    }

    #[test]
    fn size_price_wins_over_variant_and_base() -> Result<(), CatalogError> {
        let mut product = product();
        let mut navy = variant("Navy");
        navy.price = Some(15_000);
        navy.sizes = vec![size("M", Some(16_500), false), size("L", None, false)];
        let uuid = navy.uuid;
        product.variants.push(navy);

        let medium = resolve_selection(&product, Some(uuid), Some("M"), 1)?;
        let large = resolve_selection(&product, Some(uuid), Some("L"), 1)?;

        assert_eq!(medium.price, 16_500);
        assert_eq!(medium.snapshot.size.as_deref(), Some("M"));
        assert_eq!(large.price, 15_000, "size without price falls back to variant");

        Ok(())
    }

    #[test]
    fn variant_without_sizes_uses_its_name_as_size_label() -> Result<(), CatalogError> {
        let mut product = product();
        let navy = variant("Navy");
        let uuid = navy.uuid;
        product.variants.push(navy);

        let line = resolve_selection(&product, Some(uuid), None, 1)?;

        assert_eq!(line.snapshot.size.as_deref(), Some("Navy"));
        assert_eq!(line.snapshot.sku.as_deref(), Some("SKU-Navy"));
        assert_eq!(line.price, 12_000);

        Ok(())
    }

    #[test]
    fn variant_specs_replace_product_specs_when_present() -> Result<(), CatalogError> {
        let mut product = product();
        let mut navy = variant("Navy");
        navy.specs = vec![Spec {
            label: "Colour".to_string(),
            value: "Navy".to_string(),
        }];
        let uuid = navy.uuid;
        let specs = navy.specs.clone();
        product.variants.push(navy);

        let line = resolve_selection(&product, Some(uuid), None, 1)?;

        assert_eq!(line.snapshot.specs, specs);

        Ok(())
    }

    #[test]
    fn missing_size_label_is_rejected_when_sizes_exist() {
        let mut product = product();
        product.sizes = vec![size("S", None, false)];

        let result = resolve_selection(&product, None, None, 1);

        assert!(
            matches!(result, Err(CatalogError::SizeRequired)),
            "expected SizeRequired, got {result:?}"
        );
    }

    #[test]
    fn unknown_size_label_is_not_found() {
        let mut product = product();
        product.sizes = vec![size("S", None, false)];

        let result = resolve_selection(&product, None, Some("XXL"), 1);

        assert!(
            matches!(result, Err(CatalogError::SizeNotFound)),
            "expected SizeNotFound, got {result:?}"
        );
    }

    #[test]
    fn size_label_on_product_without_sizes_is_not_found() {
        let result = resolve_selection(&product(), None, Some("M"), 1);

        assert!(
            matches!(result, Err(CatalogError::SizeNotFound)),
            "expected SizeNotFound, got {result:?}"
        );
    }

    #[test]
    fn duplicate_size_labels_are_ambiguous() {
        let mut product = product();
        product.sizes = vec![size("M", None, false), size("M", Some(1), false)];

        let result = resolve_selection(&product, None, Some("M"), 1);

        assert!(
            matches!(result, Err(CatalogError::SizeNotFound)),
            "expected SizeNotFound, got {result:?}"
        );
    }

    #[test]
    fn sold_out_size_is_out_of_stock() {
        let mut product = product();
        product.sizes = vec![size("M", None, true)];

        let result = resolve_selection(&product, None, Some("M"), 1);

        assert!(
            matches!(result, Err(CatalogError::OutOfStock)),
            "expected OutOfStock, got {result:?}"
        );
    }

    #[test]
    fn quantity_above_flat_stock_is_out_of_stock() -> Result<(), CatalogError> {
        let mut product = product();
        let mut navy = variant("Navy");
        navy.stock = Some(3);
        let uuid = navy.uuid;
        product.variants.push(navy);

        resolve_selection(&product, Some(uuid), None, 3)?;

        let result = resolve_selection(&product, Some(uuid), None, 4);

        assert!(
            matches!(result, Err(CatalogError::OutOfStock)),
            "expected OutOfStock, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn product_without_any_price_is_free() -> Result<(), CatalogError> {
        let mut product = product();
        product.base_price = None;

        let line = resolve_selection(&product, None, None, 1)?;

        assert_eq!(line.price, 0);

        Ok(())
    }
}
