//! Shared constants for report layout and capture
//!
//! This module centralizes magic numbers used throughout the report
//! pipeline.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Photo Appendix
// =============================================================================

/// Columns of the photo grid
pub const PHOTO_GRID_COLUMNS: usize = 2;

/// Rows of the photo grid
pub const PHOTO_GRID_ROWS: usize = 2;

/// Photos on one appendix page; the last page may be partially filled
pub const PHOTOS_PER_PAGE: usize = PHOTO_GRID_COLUMNS * PHOTO_GRID_ROWS;

/// Gap between photo cells (points)
pub const PHOTO_CELL_GAP: f32 = 12.0;

/// Padding between a cell frame and its photo (points)
pub const PHOTO_CELL_PADDING: f32 = 6.0;

// =============================================================================
// Capture
// =============================================================================

/// Raster pixels per point when capturing a page
pub const CAPTURE_SCALE: f32 = 2.0;

/// JPEG quality of captured pages (0-100)
pub const JPEG_QUALITY: u8 = 80;

// =============================================================================
// Typography
// =============================================================================

/// Line height as a multiple of font size
pub const LINE_HEIGHT_RATIO: f32 = 1.4;

/// Default font size for the footer (points)
pub const FOOTER_FONT_SIZE: f32 = 8.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Stroke width for frames and rules (points)
pub const RULE_WIDTH: f32 = 0.5;

/// Height of a signature box (points)
pub const SIGNATURE_BOX_HEIGHT: f32 = 70.0;
