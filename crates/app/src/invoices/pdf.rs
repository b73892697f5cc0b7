//! PDF output for invoice layouts.

use lopdf::{
    Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};

use crate::invoices::{
    InvoiceError, InvoiceLayout, PageLayout,
    layout::{PAGE_HEIGHT, PAGE_WIDTH},
};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Serialize a layout into a PDF document.
pub(crate) fn write_pdf(layout: &InvoiceLayout) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font("Courier"));
    let bold_id = doc.add_object(font("Courier-Bold"));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());

    for page in &layout.pages {
        kids.push(Object::Reference(write_page(&mut doc, pages_id, page)?));
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();

    doc.save_to(&mut bytes)?;

    Ok(bytes)
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn write_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page: &PageLayout,
) -> Result<ObjectId, InvoiceError> {
    let mut operations = Vec::with_capacity(page.runs.len() * 5);

    for run in &page.runs {
        let font = if run.bold { BOLD_FONT } else { REGULAR_FONT };

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![font.into(), run.size.into()]));
        operations.push(Operation::new("Td", vec![run.x.into(), run.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(latin1(&run.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations }.encode()?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// The standard fonts only cover Latin-1; anything outside it prints as `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
