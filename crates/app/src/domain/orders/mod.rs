//! Orders
//!
//! Checkout turns a cart into a frozen order. After creation only the status and
//! its history change, and history only ever grows.

pub mod data;
pub mod errors;
pub mod invoice_number;
pub mod records;
pub(crate) mod repository;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use invoice_number::{InvoiceNumberGenerator, MockInvoiceNumberGenerator, RandomInvoiceNumbers};
pub use service::*;
pub use status::OrderStatus;
