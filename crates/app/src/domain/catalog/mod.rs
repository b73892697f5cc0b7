//! Catalog lookup
//!
//! Read-only view of products as carts need them: identity, availability and the
//! price that applies to a particular variant and size selection.

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod resolve;

pub use errors::CatalogError;
pub use resolve::{ItemSnapshot, ResolvedLine, resolve_selection};
