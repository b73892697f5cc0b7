//! Page layout for invoices.
//!
//! Text is set in Courier, where every glyph is 0.6 em wide, so widths and right
//! alignment can be computed from character counts alone.

use jiff::tz::TimeZone;

use crate::{
    domain::orders::records::{OrderItemRecord, OrderRecord},
    invoices::InvoiceError,
    money::format_amount,
};

/// A4 in PDF points.
pub const PAGE_WIDTH: i64 = 595;
pub const PAGE_HEIGHT: i64 = 842;

const MARGIN: i64 = 40;
const RIGHT_EDGE: i64 = PAGE_WIDTH - MARGIN;
const TOP: i64 = PAGE_HEIGHT - MARGIN;
const CONTENT_BOTTOM: i64 = 64;
const FOOTER_Y: i64 = 28;

const BODY_SIZE: i64 = 10;
const HEADING_SIZE: i64 = 14;
const TITLE_SIZE: i64 = 20;
const TOTAL_SIZE: i64 = 12;

const ROW_HEIGHT: i64 = 14;

const QTY_EDGE: i64 = 340;
const UNIT_PRICE_EDGE: i64 = 450;
const DESCRIPTION_CHARS: usize = 42;

/// One piece of text at an absolute position, baseline origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub x: i64,
    pub y: i64,
    pub size: i64,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
}

impl PageLayout {
    /// Whether any run on the page has exactly this text.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.runs.iter().any(|run| run.text == text)
    }
}

/// All pages of one invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLayout {
    pub pages: Vec<PageLayout>,
}

impl InvoiceLayout {
    /// Lay out an order, starting a new page whenever the next row would run into
    /// the footer.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::Pricing`] if a line total overflows.
    pub fn for_order(order: &OrderRecord) -> Result<Self, InvoiceError> {
        let mut builder = Builder::new(&order.invoice_number);

        builder.first_page_header(order);

        for item in &order.items {
            builder.item_row(item)?;
        }

        builder.totals(order);

        Ok(builder.finish())
    }
}

struct Builder<'a> {
    invoice_number: &'a str,
    pages: Vec<PageLayout>,
    y: i64,
}

impl<'a> Builder<'a> {
    fn new(invoice_number: &'a str) -> Self {
        Self {
            invoice_number,
            pages: vec![PageLayout::default()],
            y: TOP,
        }
    }

    fn push(&mut self, x: i64, size: i64, bold: bool, text: impl Into<String>) {
        let y = self.y;

        if let Some(page) = self.pages.last_mut() {
            page.runs.push(TextRun {
                x,
                y,
                size,
                bold,
                text: text.into(),
            });
        }
    }

    fn left(&mut self, size: i64, bold: bool, text: impl Into<String>) {
        self.push(MARGIN, size, bold, text);
    }

    fn right(&mut self, edge: i64, size: i64, bold: bool, text: impl Into<String>) {
        let text = text.into();
        let x = edge - text_width(&text, size);

        self.push(x, size, bold, text);
    }

    fn advance(&mut self, by: i64) {
        self.y -= by;
    }

    /// Start a new page if `height` more points would cross into the footer.
    fn reserve(&mut self, height: i64) {
        if self.y - height >= CONTENT_BOTTOM {
            return;
        }

        self.pages.push(PageLayout::default());
        self.y = TOP;

        self.right(
            RIGHT_EDGE,
            BODY_SIZE,
            true,
            format!("Invoice {} (continued)", self.invoice_number),
        );
        self.advance(ROW_HEIGHT * 2);
        self.column_headings();
    }

    fn first_page_header(&mut self, order: &OrderRecord) {
        self.right(RIGHT_EDGE, TITLE_SIZE, true, "Invoice");
        self.advance(TITLE_SIZE + 8);

        self.right(
            RIGHT_EDGE,
            BODY_SIZE,
            false,
            format!("Invoice #: {}", order.invoice_number),
        );
        self.advance(ROW_HEIGHT);

        let date = order.created_at.to_zoned(TimeZone::UTC).date();
        self.right(RIGHT_EDGE, BODY_SIZE, false, format!("Date: {date}"));
        self.advance(ROW_HEIGHT * 2);

        self.left(HEADING_SIZE, true, "Customer");
        self.advance(HEADING_SIZE + 4);

        for line in [&order.customer.name, &order.customer.email, &order.customer.phone] {
            if !line.is_empty() {
                self.left(BODY_SIZE, false, line.as_str());
                self.advance(ROW_HEIGHT);
            }
        }

        self.advance(ROW_HEIGHT);
        self.left(HEADING_SIZE, true, "Shipping Address");
        self.advance(HEADING_SIZE + 4);

        let address: Vec<String> = order
            .shipping_address
            .lines()
            .map(ToString::to_string)
            .collect();

        for line in address {
            self.left(BODY_SIZE, false, line);
            self.advance(ROW_HEIGHT);
        }

        self.advance(ROW_HEIGHT);
        self.left(HEADING_SIZE, true, "Items");
        self.advance(HEADING_SIZE + 6);

        self.column_headings();
    }

    fn column_headings(&mut self) {
        self.left(BODY_SIZE, true, "Description");
        self.right(QTY_EDGE, BODY_SIZE, true, "Qty");
        self.right(UNIT_PRICE_EDGE, BODY_SIZE, true, "Unit price");
        self.right(RIGHT_EDGE, BODY_SIZE, true, "Total");
        self.advance(ROW_HEIGHT + 4);
    }

    fn item_row(&mut self, item: &OrderItemRecord) -> Result<(), InvoiceError> {
        let line_total = item.line_total()?;

        self.reserve(ROW_HEIGHT);

        self.left(BODY_SIZE, false, describe(item));
        self.right(QTY_EDGE, BODY_SIZE, false, item.quantity.to_string());
        self.right(UNIT_PRICE_EDGE, BODY_SIZE, false, format_amount(item.price));
        self.right(RIGHT_EDGE, BODY_SIZE, false, format_amount(line_total));
        self.advance(ROW_HEIGHT);

        Ok(())
    }

    fn totals(&mut self, order: &OrderRecord) {
        self.reserve(ROW_HEIGHT * 4);
        self.advance(ROW_HEIGHT);

        self.right(
            RIGHT_EDGE,
            TOTAL_SIZE,
            false,
            format!("Subtotal: {}", format_amount(order.subtotal)),
        );
        self.advance(ROW_HEIGHT + 2);

        self.right(
            RIGHT_EDGE,
            TOTAL_SIZE,
            false,
            format!("Shipping: {}", format_amount(order.shipping_fee)),
        );
        self.advance(ROW_HEIGHT + 4);

        self.right(
            RIGHT_EDGE,
            HEADING_SIZE,
            true,
            format!("Total: {}", format_amount(order.total)),
        );
    }

    fn finish(mut self) -> InvoiceLayout {
        let count = self.pages.len();

        for (index, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {count}", index + 1);
            let x = (PAGE_WIDTH - text_width(&text, BODY_SIZE)) / 2;

            page.runs.push(TextRun {
                x,
                y: FOOTER_Y,
                size: BODY_SIZE,
                bold: false,
                text,
            });
        }

        InvoiceLayout { pages: self.pages }
    }
}

/// Item name with its size in parentheses, cut to fit the description column.
fn describe(item: &OrderItemRecord) -> String {
    let description = match item.snapshot.size.as_deref() {
        Some(size) if !size.is_empty() => format!("{} ({size})", item.snapshot.name),
        _ => item.snapshot.name.clone(),
    };

    if description.chars().count() <= DESCRIPTION_CHARS {
        return description;
    }

    let mut cut: String = description.chars().take(DESCRIPTION_CHARS - 3).collect();
    cut.push_str("...");
    cut
}

fn text_width(text: &str, size: i64) -> i64 {
    let chars = i64::try_from(text.chars().count()).unwrap_or(i64::MAX / 1_000);

    chars * size * 3 / 5
}
