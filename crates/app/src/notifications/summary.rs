//! Plain-text order summary for operator mail.

use crate::{domain::orders::records::OrderRecord, money::format_amount};

#[must_use]
pub fn order_subject(order: &OrderRecord) -> String {
    format!("New Order {}", order.invoice_number)
}

/// Customer, payment, one line per item, then the totals block.
#[must_use]
pub fn order_summary(order: &OrderRecord) -> String {
    let mut lines = vec![
        format!("New order {}", order.invoice_number),
        format!(
            "Customer: {} ({})",
            order.customer.name, order.customer.phone
        ),
        format!("Email: {}", order.customer.email),
        format!("Payment: {}", order.payment_method.label()),
        String::new(),
    ];

    lines.extend(order.items.iter().map(|item| {
        let size = item
            .snapshot
            .size
            .as_deref()
            .map(|size| format!(" ({size})"))
            .unwrap_or_default();

        format!(
            "{}{size} x{} - {}",
            item.snapshot.name,
            item.quantity,
            format_amount(item.price)
        )
    }));

    lines.push(String::new());

    if let Some(notes) = order.notes.as_deref().filter(|notes| !notes.trim().is_empty()) {
        lines.push(format!("Notes: {notes}"));
        lines.push(String::new());
    }

    lines.push(format!("Subtotal: {}", format_amount(order.subtotal)));
    lines.push(format!("Shipping: {}", format_amount(order.shipping_fee)));
    lines.push(format!("Total: {}", format_amount(order.total)));

    lines.join("\n")
}
