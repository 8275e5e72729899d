use super::surface::{FontStyle, Surface, SurfaceBuilder};
use crate::constants::{FOOTER_FONT_SIZE, LINE_HEIGHT_RATIO, PHOTO_CELL_PADDING};
use crate::layout::{Rect, photo_grid_cells};
use crate::options::ReportOptions;
use workorder_core::WorkOrder;

pub(super) fn render(
    order: &WorkOrder,
    photos: &[usize],
    numbering: (usize, usize),
    options: &ReportOptions,
) -> Surface {
    let mut b = SurfaceBuilder::new(options, numbering);
    let size = options.body_font_size_pt;
    let caption_height = size * LINE_HEIGHT_RATIO;

    b.heading("Photos");
    b.gap(size * 0.5);

    // Leave room for the footer below the grid.
    let top = b.cursor();
    let bottom = b.page_content_bottom() - FOOTER_FONT_SIZE * LINE_HEIGHT_RATIO * 2.0;
    let area = Rect::new(b.left(), top, b.content_width(), (bottom - top).max(0.0));

    for (slot, cell) in photo_grid_cells(&area).into_iter().enumerate() {
        b.frame(cell);

        // Unused cells stay as empty frames.
        let Some(&index) = photos.get(slot) else {
            continue;
        };

        let photo = order.photos().get(index);
        let label = match photo.and_then(|p| p.name.as_deref()) {
            Some(name) => format!("Photo {}: {}", index + 1, name),
            None => format!("Photo {}", index + 1),
        };

        let inner = cell.inset(PHOTO_CELL_PADDING);
        let image_rect = Rect::new(
            inner.x,
            inner.y,
            inner.width,
            (inner.height - caption_height).max(0.0),
        );
        b.image(image_rect, label.clone(), photo.map(|p| p.data.clone()));

        let caption_top = image_rect.bottom() + size * (LINE_HEIGHT_RATIO - 1.0) / 2.0;
        b.text_at_top(inner.x, caption_top, label, size, FontStyle::Regular);
    }

    b.finish()
}
