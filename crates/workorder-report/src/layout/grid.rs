//! Photo grid layout
//!
//! The photo appendix uses a fixed grid so that every page looks the same,
//! including a partially filled last page.

use crate::constants::{PHOTO_CELL_GAP, PHOTO_GRID_COLUMNS, PHOTO_GRID_ROWS};

use super::Rect;

/// Cells of the photo grid inside `area`, row by row from the top left.
///
/// Always returns [`PHOTO_GRID_COLUMNS`] × [`PHOTO_GRID_ROWS`] cells.
pub fn photo_grid_cells(area: &Rect) -> Vec<Rect> {
    let cols = PHOTO_GRID_COLUMNS as f32;
    let rows = PHOTO_GRID_ROWS as f32;
    let cell_width = ((area.width - (cols - 1.0) * PHOTO_CELL_GAP) / cols).max(0.0);
    let cell_height = ((area.height - (rows - 1.0) * PHOTO_CELL_GAP) / rows).max(0.0);

    let mut cells = Vec::with_capacity(PHOTO_GRID_COLUMNS * PHOTO_GRID_ROWS);
    for row in 0..PHOTO_GRID_ROWS {
        for col in 0..PHOTO_GRID_COLUMNS {
            cells.push(Rect::new(
                area.x + col as f32 * (cell_width + PHOTO_CELL_GAP),
                area.y + row as f32 * (cell_height + PHOTO_CELL_GAP),
                cell_width,
                cell_height,
            ));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PHOTOS_PER_PAGE;

    #[test]
    fn test_grid_fills_area() {
        let area = Rect::new(10.0, 20.0, 212.0, 412.0);
        let cells = photo_grid_cells(&area);
        assert_eq!(cells.len(), PHOTOS_PER_PAGE);

        assert_eq!(cells[0].x, 10.0);
        assert_eq!(cells[0].y, 20.0);
        assert_eq!(cells[0].width, 100.0);
        assert_eq!(cells[0].height, 200.0);

        // Row-major order: second cell is to the right, third is below.
        assert_eq!(cells[1].x, 122.0);
        assert_eq!(cells[1].y, 20.0);
        assert_eq!(cells[2].x, 10.0);
        assert_eq!(cells[2].y, 232.0);
        assert_eq!(cells[3].right(), area.right());
        assert_eq!(cells[3].bottom(), area.bottom());
    }
}
