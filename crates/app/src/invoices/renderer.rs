//! Invoice renderer.

use mockall::automock;
use tracing::debug;

use crate::{
    domain::orders::records::OrderRecord,
    invoices::{InvoiceError, InvoiceLayout, pdf::write_pdf},
};

#[automock]
pub trait InvoiceRenderer: Send + Sync {
    /// Render an order as a PDF document.
    fn render(&self, order: &OrderRecord) -> Result<Vec<u8>, InvoiceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfInvoiceRenderer;

impl InvoiceRenderer for PdfInvoiceRenderer {
    fn render(&self, order: &OrderRecord) -> Result<Vec<u8>, InvoiceError> {
        let layout = InvoiceLayout::for_order(order)?;
        let bytes = write_pdf(&layout)?;

        debug!(
            invoice_number = %order.invoice_number,
            pages = layout.pages.len(),
            bytes = bytes.len(),
            "rendered invoice"
        );

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use lopdf::Document;
    use testresult::TestResult;

    use crate::test::fixtures::order_with_items;

    use super::*;

    #[test]
    fn renders_a_pdf_with_one_page_per_layout_page() -> TestResult {
        let order = order_with_items(150);

        let bytes = PdfInvoiceRenderer.render(&order)?;
        let expected = InvoiceLayout::for_order(&order)?.pages.len();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(Document::load_mem(&bytes)?.get_pages().len(), expected);

        Ok(())
    }

    #[test]
    fn rendering_is_deterministic_for_the_same_order() -> TestResult {
        let order = order_with_items(4);

        let first = InvoiceLayout::for_order(&order)?;
        let second = InvoiceLayout::for_order(&order)?;

        assert_eq!(first, second);

        Ok(())
    }
}
