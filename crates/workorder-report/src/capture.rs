//! Surface capture
//!
//! A surface is rasterized as a whole at [`CAPTURE_SCALE`] pixels per point
//! and stored as one JPEG. Text is filled from font outlines, rules and
//! frames are stroked, and image payloads are decoded and fitted into their
//! slots. A payload that does not decode leaves its slot framed and empty;
//! the rest of the page is kept.

use crate::constants::{CAPTURE_SCALE, JPEG_QUALITY, RULE_WIDTH};
use crate::fonts::FontSet;
use crate::layout::Rect;
use crate::options::ReportOptions;
use crate::render::{Element, FontStyle, Surface};
use crate::types::{CaptureError, CaptureFailure};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType};
use std::sync::Arc;
use tiny_skia::{
    Color, FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Converts surfaces into captured pages, one at a time.
///
/// Capture takes `&mut self`: an implementation may hold scratch state that
/// is reused from page to page.
pub trait SurfaceCapturer {
    fn capture(&mut self, surface: &Surface) -> Result<CapturedPage, CaptureError>;
}

/// One surface as a JPEG image
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPage {
    pub page_number: usize,
    pub width_pt: f32,
    pub height_pt: f32,
    pub width_px: u32,
    pub height_px: u32,
    pub jpeg: Vec<u8>,
    /// Labels of image slots left empty because their payload did not decode
    pub empty_slots: Vec<String>,
}

/// Default capturer: whole-page raster, JPEG at a fixed quality.
pub struct RasterCapturer {
    scale: f32,
    quality: u8,
    fonts: Arc<FontSet>,
    /// RGB pixels of the page being encoded, reused between pages
    staging: Vec<u8>,
}

impl Default for RasterCapturer {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterCapturer {
    /// Capturer using the system sans-serif font.
    pub fn new() -> Self {
        Self::with_fonts(FontSet::system())
    }

    pub fn with_fonts(fonts: Arc<FontSet>) -> Self {
        Self {
            scale: CAPTURE_SCALE,
            quality: JPEG_QUALITY,
            fonts,
            staging: Vec::new(),
        }
    }

    /// Capturer using the font files named in `options`, or the system font.
    pub fn from_options(options: &ReportOptions) -> crate::types::Result<Self> {
        match &options.font_file {
            Some(regular) => {
                let fonts = FontSet::from_files(regular, options.bold_font_file.as_deref())?;
                Ok(Self::with_fonts(Arc::new(fonts)))
            }
            None => Ok(Self::new()),
        }
    }

    fn encode(&mut self, pixmap: &Pixmap) -> Result<Vec<u8>, CaptureFailure> {
        // Every pixel is opaque, so premultiplied RGBA equals straight RGBA.
        self.staging.clear();
        self.staging.reserve(pixmap.data().len() / 4 * 3);
        for px in pixmap.data().chunks_exact(4) {
            self.staging.extend_from_slice(&px[..3]);
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality)
            .encode(
                &self.staging,
                pixmap.width(),
                pixmap.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| CaptureFailure::Encode(e.to_string()))?;
        Ok(jpeg)
    }
}

impl SurfaceCapturer for RasterCapturer {
    fn capture(&mut self, surface: &Surface) -> Result<CapturedPage, CaptureError> {
        let fail = |reason| CaptureError {
            page_number: surface.page_number,
            reason,
        };

        if !(surface.width > 0.0 && surface.height > 0.0) {
            return Err(fail(CaptureFailure::EmptySurface));
        }

        let width_px = (surface.width * self.scale).ceil() as u32;
        let height_px = (surface.height * self.scale).ceil() as u32;
        let pixmap = Pixmap::new(width_px, height_px).ok_or_else(|| {
            fail(CaptureFailure::TooLarge {
                width_px,
                height_px,
            })
        })?;

        let mut empty_slots = Vec::new();
        let pixmap = {
            let mut canvas = Canvas::new(pixmap, self.scale, &self.fonts);
            for element in &surface.elements {
                match element {
                    Element::Text {
                        x,
                        baseline,
                        size,
                        style,
                        text,
                    } => canvas.text(*x, *baseline, *size, *style, text),
                    Element::Rule { x1, y1, x2, y2 } => canvas.line(*x1, *y1, *x2, *y2),
                    Element::Frame(rect) => canvas.frame(rect),
                    Element::Image { rect, label, data } => {
                        let data = data
                            .as_ref()
                            .ok_or_else(|| fail(CaptureFailure::MissingImage(label.clone())))?;
                        match image::load_from_memory(data) {
                            Ok(decoded) => canvas.image(rect, decoded),
                            Err(e) => {
                                log::warn!(
                                    "Page {}: {} could not be decoded, leaving it empty: {}",
                                    surface.page_number,
                                    label,
                                    e
                                );
                                canvas.frame(rect);
                                empty_slots.push(label.clone());
                            }
                        }
                    }
                }
            }
            canvas.pixmap
        };

        let jpeg = self.encode(&pixmap).map_err(fail)?;
        log::debug!(
            "Captured page {} at {}x{} px, {} bytes",
            surface.page_number,
            width_px,
            height_px,
            jpeg.len()
        );

        Ok(CapturedPage {
            page_number: surface.page_number,
            width_pt: surface.width,
            height_pt: surface.height,
            width_px,
            height_px,
            jpeg,
            empty_slots,
        })
    }
}

// =============================================================================
// Drawing
// =============================================================================

/// A white pixmap addressed in top-down surface points.
struct Canvas<'a> {
    pixmap: Pixmap,
    scale: f32,
    transform: Transform,
    fonts: &'a FontSet,
    ink: Paint<'static>,
    rule: Paint<'static>,
    stroke: Stroke,
}

impl<'a> Canvas<'a> {
    fn new(mut pixmap: Pixmap, scale: f32, fonts: &'a FontSet) -> Self {
        pixmap.fill(Color::WHITE);
        Self {
            pixmap,
            scale,
            transform: Transform::from_scale(scale, scale),
            fonts,
            ink: solid(0),
            rule: solid(153),
            stroke: Stroke {
                width: RULE_WIDTH,
                ..Stroke::default()
            },
        }
    }

    fn text(&mut self, x: f32, baseline: f32, size: f32, style: FontStyle, text: &str) {
        let mut path = PathBuilder::new();
        self.fonts
            .outline_text(&mut path, text, x, baseline, size, style);
        if let Some(path) = path.finish() {
            self.pixmap
                .fill_path(&path, &self.ink, FillRule::Winding, self.transform, None);
        }
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let mut path = PathBuilder::new();
        path.move_to(x1, y1);
        path.line_to(x2, y2);
        if let Some(path) = path.finish() {
            self.pixmap
                .stroke_path(&path, &self.rule, &self.stroke, self.transform, None);
        }
    }

    fn frame(&mut self, rect: &Rect) {
        let Some(bounds) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        else {
            return;
        };
        let path = PathBuilder::from_rect(bounds);
        self.pixmap
            .stroke_path(&path, &self.rule, &self.stroke, self.transform, None);
    }

    /// Fit `image` into `rect`, resampled to device pixels.
    fn image(&mut self, rect: &Rect, image: DynamicImage) {
        let placed = rect.fit(image.width() as f32, image.height() as f32);
        let width = (placed.width * self.scale).round() as u32;
        let height = (placed.height * self.scale).round() as u32;
        let Some(size) = IntSize::from_wh(width, height) else {
            return;
        };

        let resized = image.resize_exact(width, height, FilterType::Triangle);
        let Some(tile) = Pixmap::from_vec(flatten(resized), size) else {
            return;
        };
        self.pixmap.draw_pixmap(
            (placed.x * self.scale).round() as i32,
            (placed.y * self.scale).round() as i32,
            tile.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

fn solid(gray: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(gray, gray, gray, 255);
    paint.anti_alias = true;
    paint
}

/// Composite onto white, producing opaque RGBA.
fn flatten(image: DynamicImage) -> Vec<u8> {
    let rgba = image.into_rgba8();
    let mut out = Vec::with_capacity(rgba.as_raw().len());
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        let a = a as u16;
        let blend = |c: u8| ((c as u16 * a + 255 * (255 - a)) / 255) as u8;
        out.extend_from_slice(&[blend(r), blend(g), blend(b), 255]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_blends_onto_white() {
        let image = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        assert_eq!(flatten(DynamicImage::ImageRgba8(image)), vec![255, 255, 255, 255]);

        let image = image::RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
        assert_eq!(flatten(DynamicImage::ImageRgba8(image)), vec![10, 20, 30, 255]);
    }

    #[test]
    fn test_canvas_maps_points_to_pixels() {
        let fonts = FontSet::empty();
        let pixmap = Pixmap::new(40, 40).unwrap();
        let mut canvas = Canvas::new(pixmap, 2.0, &fonts);

        let red = image::RgbImage::from_pixel(4, 4, image::Rgb([255, 0, 0]));
        canvas.image(&Rect::new(5.0, 5.0, 10.0, 10.0), DynamicImage::ImageRgb8(red));

        let at = |x: u32, y: u32| canvas.pixmap.pixel(x, y).unwrap();
        assert_eq!((at(20, 20).red(), at(20, 20).green()), (255, 0));
        assert_eq!(at(5, 5).green(), 255);
        assert_eq!(at(35, 35).green(), 255);
    }
}
