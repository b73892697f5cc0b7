//! Catalog lookup errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found")]
    ProductNotFound,

    #[error("variant not found")]
    VariantNotFound,

    #[error("size not found")]
    SizeNotFound,

    #[error("size is required")]
    SizeRequired,

    #[error("variant is inactive")]
    Inactive,

    #[error("item is out of stock")]
    OutOfStock,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CatalogError {
    /// Whether the error signals a missing product, variant or size.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound | Self::VariantNotFound | Self::SizeNotFound
        )
    }
}

impl From<Error> for CatalogError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ProductNotFound;
        }

        Self::Sql(error)
    }
}
