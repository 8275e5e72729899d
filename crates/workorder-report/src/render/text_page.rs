use super::surface::{FontStyle, Surface, SurfaceBuilder};
use super::wrap::wrap_text;
use crate::constants::{HELVETICA_CHAR_WIDTH_RATIO, SIGNATURE_BOX_HEIGHT};
use crate::layout::Rect;
use crate::options::ReportOptions;
use workorder_core::{ContentField, LineItem, SignatureRole, WorkOrder};

const SIGNATURE_GAP: f32 = 18.0;
const SIGNATURE_PADDING: f32 = 4.0;

// Product table columns as fractions of the content width
const QUANTITY_COLUMN: f32 = 0.50;
const SERIAL_COLUMN: f32 = 0.60;

pub(super) fn render(
    order: &WorkOrder,
    fields: &[ContentField],
    header: bool,
    signatures: bool,
    numbering: (usize, usize),
    options: &ReportOptions,
) -> Surface {
    let mut b = SurfaceBuilder::new(options, numbering);

    if header {
        render_header(&mut b, order);
    }

    for field in fields {
        match field {
            ContentField::Products => render_products(&mut b, order.line_items()),
            field => render_free_text(&mut b, field.title(), order.text(*field)),
        }
    }

    if signatures {
        render_signatures(&mut b, order);
    }

    b.finish()
}

fn render_header(b: &mut SurfaceBuilder, order: &WorkOrder) {
    let title = b.options().title.clone();
    let title_size = b.options().title_font_size_pt;
    let size = b.options().body_font_size_pt;

    b.line(title, title_size, FontStyle::Bold);
    b.gap(size * 0.5);

    let value_x = b.left() + b.content_width() * 0.25;
    let rows = [
        (
            "Date / time",
            order.date_time().format("%Y-%m-%d %H:%M").to_string(),
        ),
        ("Service unit", order.service_unit().to_string()),
        ("Contact person", order.contact_person().to_string()),
        ("Phone", order.contact_phone().to_string()),
    ];
    for (label, value) in rows {
        b.text_at(value_x, value, size, FontStyle::Regular);
        b.line(label, size, FontStyle::Bold);
    }
    b.gap(size * 0.5);
    b.rule();
}

fn render_free_text(b: &mut SurfaceBuilder, title: &str, text: &str) {
    let size = b.options().body_font_size_pt;
    let width = b.options().limits.avg_chars_per_line;

    b.heading(title);
    let lines = wrap_text(text, width);
    if lines.is_empty() {
        b.advance(size);
    }
    for line in lines {
        b.line(line, size, FontStyle::Regular);
    }
}

fn render_products(b: &mut SurfaceBuilder, items: &[LineItem]) {
    let size = b.options().body_font_size_pt;
    let quantity_x = b.left() + b.content_width() * QUANTITY_COLUMN;
    let serial_x = b.left() + b.content_width() * SERIAL_COLUMN;
    let name_chars = column_chars(b.content_width() * QUANTITY_COLUMN, size);

    b.heading(ContentField::Products.title());
    b.text_at(quantity_x, "Qty", size, FontStyle::Bold);
    b.text_at(serial_x, "Serial number", size, FontStyle::Bold);
    b.line("Product", size, FontStyle::Bold);
    b.rule();

    let mut any = false;
    for item in items.iter().filter(|item| !item.is_blank()) {
        any = true;
        for (unit, serial) in item.serial_numbers().iter().enumerate() {
            if unit == 0 {
                b.text_at(quantity_x, item.quantity().to_string(), size, FontStyle::Regular);
                b.text_at(b.left(), truncate(item.name(), name_chars), size, FontStyle::Regular);
            }
            b.text_at(serial_x, format!("{}. {}", unit + 1, serial), size, FontStyle::Regular);
            b.advance(size);
        }
    }
    if !any {
        b.advance(size);
    }
}

fn render_signatures(b: &mut SurfaceBuilder, order: &WorkOrder) {
    let size = b.options().body_font_size_pt;
    let box_width = (b.content_width() - SIGNATURE_GAP) / 2.0;
    let left = b.left();

    b.heading("Signatures");
    let roles = [SignatureRole::Customer, SignatureRole::Technician];
    for (i, role) in roles.iter().enumerate() {
        let x = left + i as f32 * (box_width + SIGNATURE_GAP);
        b.text_at(x, format!("{} signature", role.label()), size, FontStyle::Regular);
    }
    b.advance(size);

    let top = b.cursor();
    for (i, role) in roles.into_iter().enumerate() {
        let frame = Rect::new(
            left + i as f32 * (box_width + SIGNATURE_GAP),
            top,
            box_width,
            SIGNATURE_BOX_HEIGHT,
        );
        b.frame(frame);
        if let Some(signature) = order.signature(role) {
            b.image(
                frame.inset(SIGNATURE_PADDING),
                format!("{} signature", role.label()),
                Some(signature.data.clone()),
            );
        }
    }
    b.gap(SIGNATURE_BOX_HEIGHT);
}

/// Characters of body text that fit in `width` points.
fn column_chars(width: f32, size: f32) -> usize {
    ((width / (size * HELVETICA_CHAR_WIDTH_RATIO)) as usize).max(1)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
