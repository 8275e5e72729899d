//! Fonts for rasterizing text
//!
//! Faces are resolved once per process from the system font database, or
//! loaded from files named in the report options. Without any usable face,
//! text is drawn as placeholder blocks.

use crate::render::FontStyle;
use crate::types::*;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tiny_skia::PathBuilder;

/// Families tried in order before falling back to any sans-serif face
const PREFERRED_FAMILIES: &[&str] = &[
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "Nimbus Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

static SYSTEM_FONTS: OnceLock<Arc<FontSet>> = OnceLock::new();

/// Raw data of one font face
#[derive(Debug, Clone)]
pub struct FontFace {
    data: Vec<u8>,
    index: u32,
}

impl FontFace {
    /// Check that `data` parses as a font before keeping it.
    pub fn new(
        data: Vec<u8>,
        index: u32,
    ) -> std::result::Result<Self, ttf_parser::FaceParsingError> {
        ttf_parser::Face::parse(&data, index)?;
        Ok(Self { data, index })
    }

    fn parse(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }
}

/// Regular and bold faces used by the capturer
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    regular: Option<FontFace>,
    bold: Option<FontFace>,
}

impl FontSet {
    /// No faces: every text run becomes placeholder blocks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sans-serif faces from the system font database, resolved once.
    pub fn system() -> Arc<FontSet> {
        SYSTEM_FONTS
            .get_or_init(|| Arc::new(Self::load_system()))
            .clone()
    }

    fn load_system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let mut families: Vec<fontdb::Family> = PREFERRED_FAMILIES
            .iter()
            .map(|name| fontdb::Family::Name(*name))
            .collect();
        families.push(fontdb::Family::SansSerif);

        let face = |weight| {
            let query = fontdb::Query {
                families: &families,
                weight,
                ..fontdb::Query::default()
            };
            let id = db.query(&query)?;
            db.with_face_data(id, |data, index| FontFace::new(data.to_vec(), index).ok())
                .flatten()
        };

        let set = Self {
            regular: face(fontdb::Weight::NORMAL),
            bold: face(fontdb::Weight::BOLD),
        };
        if set.regular.is_none() {
            log::warn!(
                "No sans-serif font among {} system face(s); text will be drawn as blocks",
                db.len()
            );
        }
        set
    }

    /// Load faces from font files; bold falls back to regular when absent.
    pub fn from_files(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        let load = |path: &Path| -> Result<FontFace> {
            let data = std::fs::read(path)?;
            FontFace::new(data, 0).map_err(|e| {
                ReportError::Config(format!("{} is not a usable font: {}", path.display(), e))
            })
        };
        Ok(Self {
            regular: Some(load(regular)?),
            bold: bold.map(load).transpose()?,
        })
    }

    pub fn has_glyphs(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }

    fn face(&self, style: FontStyle) -> Option<&FontFace> {
        match style {
            FontStyle::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontStyle::Regular => self.regular.as_ref().or(self.bold.as_ref()),
        }
    }

    /// Append the outline of `text` to `path`, in points, with the pen
    /// starting at (`x`, `baseline`) and y growing downward.
    pub(crate) fn outline_text(
        &self,
        path: &mut PathBuilder,
        text: &str,
        x: f32,
        baseline: f32,
        size: f32,
        style: FontStyle,
    ) {
        match self.face(style).and_then(FontFace::parse) {
            Some(face) => outline_glyphs(&face, path, text, x, baseline, size),
            None => outline_blocks(path, text, x, baseline, size),
        }
    }
}

fn outline_glyphs(
    face: &ttf_parser::Face<'_>,
    path: &mut PathBuilder,
    text: &str,
    x: f32,
    baseline: f32,
    size: f32,
) {
    let scale = size / face.units_per_em() as f32;
    let fallback = face.glyph_index('?');
    let mut pen = GlyphPen {
        path,
        x,
        baseline,
        scale,
    };

    for c in text.chars() {
        let c = if c == '\t' { ' ' } else { c };
        let Some(glyph) = face.glyph_index(c).or(fallback) else {
            pen.x += size * 0.5;
            continue;
        };
        face.outline_glyph(glyph, &mut pen);
        let advance = face.glyph_hor_advance(glyph).unwrap_or(0);
        pen.x += advance as f32 * scale;
    }
}

/// Rough letter shapes for when no face is available
fn outline_blocks(path: &mut PathBuilder, text: &str, x: f32, baseline: f32, size: f32) {
    let advance = size * 0.5;
    let width = advance * 0.8;
    let mut left = x;

    for c in text.chars() {
        if !(c.is_whitespace() || c.is_control()) {
            let height = if c.is_lowercase() { size * 0.5 } else { size * 0.7 };
            if let Some(rect) =
                tiny_skia::Rect::from_ltrb(left, baseline - height, left + width, baseline)
            {
                path.push_rect(rect);
            }
        }
        left += advance;
    }
}

/// Maps font units (y up) onto top-down surface points.
struct GlyphPen<'a> {
    path: &'a mut PathBuilder,
    x: f32,
    baseline: f32,
    scale: f32,
}

impl GlyphPen<'_> {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.baseline - y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for GlyphPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.path.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.path.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}
