//! Invoice rendering
//!
//! Orders are laid out into positioned text runs first, then written out as PDF.
//! Only frozen order data is read, so re-rendering an order always yields the same
//! figures.

mod errors;
mod layout;
mod pdf;
mod renderer;

pub use errors::InvoiceError;
pub use layout::{InvoiceLayout, PageLayout, TextRun};
pub use renderer::*;
