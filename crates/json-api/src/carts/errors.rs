//! Errors

use salvo::http::StatusError;
use tracing::error;

use souq_app::domain::{carts::CartsServiceError, catalog::CatalogError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive whole number")
        }
        CartsServiceError::ItemNotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidReference => StatusError::not_found().brief("Product not found"),
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Catalog(source) => catalog_status_error(&source),
        CartsServiceError::Pricing(source) => {
            tracing::debug!("rejected cart line: {source}");

            StatusError::bad_request().brief("Cart amounts are too large")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn catalog_status_error(error: &CatalogError) -> StatusError {
    match error {
        CatalogError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CatalogError::VariantNotFound => StatusError::not_found().brief("Variant not found"),
        CatalogError::SizeNotFound => StatusError::not_found().brief("Size not found"),
        CatalogError::SizeRequired => StatusError::bad_request().brief("A size must be chosen"),
        CatalogError::Inactive => StatusError::bad_request().brief("Item is not available"),
        CatalogError::OutOfStock => StatusError::bad_request().brief("Item is out of stock"),
        CatalogError::Sql(source) => {
            error!("catalog lookup failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
