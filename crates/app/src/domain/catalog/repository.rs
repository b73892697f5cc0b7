//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::domain::catalog::records::{
    ProductRecord, ProductUuid, SizeOption, Spec, VariantRecord, VariantUuid,
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_VARIANTS_SQL: &str = include_str!("sql/get_product_variants.sql");
const GET_PRODUCT_SIZES_SQL: &str = include_str!("sql/get_product_sizes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Load a product with its variants and sizes.
    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut record = query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        record.variants = query_as::<Postgres, VariantRecord>(GET_PRODUCT_VARIANTS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let sizes = query_as::<Postgres, SizeRow>(GET_PRODUCT_SIZES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        for SizeRow { variant_uuid, size } in sizes {
            match variant_uuid {
                None => record.sizes.push(size),
                Some(uuid) => {
                    let uuid = VariantUuid::from_uuid(uuid);

                    if let Some(variant) = record.variants.iter_mut().find(|v| v.uuid == uuid) {
                        variant.sizes.push(size);
                    }
                }
            }
        }

        Ok(record)
    }
}

struct SizeRow {
    variant_uuid: Option<Uuid>,
    size: SizeOption,
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            image: row.try_get("image")?,
            base_price: try_get_optional_amount(row, "base_price")?,
            specs: row.try_get::<Json<Vec<Spec>>, _>("specs")?.0,
            is_active: row.try_get("is_active")?,
            sizes: Vec::new(),
            variants: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock = row
            .try_get::<Option<i32>, _>("stock")?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            price: try_get_optional_amount(row, "price")?,
            stock,
            specs: row.try_get::<Json<Vec<Spec>>, _>("specs")?.0,
            is_active: row.try_get("is_active")?,
            sizes: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SizeRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            variant_uuid: row.try_get("variant_uuid")?,
            size: SizeOption {
                label: row.try_get("label")?,
                price: try_get_optional_amount(row, "price")?,
                out_of_stock: row.try_get("out_of_stock")?,
            },
        })
    }
}

fn try_get_optional_amount(row: &PgRow, col: &str) -> Result<Option<u64>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(col)?
        .map(u64::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}
