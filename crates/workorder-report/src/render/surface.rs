use crate::constants::{
    FOOTER_FONT_SIZE, HELVETICA_CHAR_WIDTH_RATIO, LINE_HEIGHT_RATIO, RULE_WIDTH, mm_to_pt,
};
use crate::layout::Rect;
use crate::options::ReportOptions;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Something drawn on a surface. Coordinates are in points, measured from
/// the top left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        /// Baseline, measured downward
        baseline: f32,
        size: f32,
        style: FontStyle,
        text: String,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Frame(Rect),
    /// An image fitted into `rect`. `data` is `None` when the payload the
    /// slot refers to could not be found.
    Image {
        rect: Rect,
        label: String,
        data: Option<Bytes>,
    },
}

/// The renderable form of one planned page.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub page_number: usize,
    pub total_pages: usize,
    pub width: f32,
    /// Natural height; at least one page, more when content overflows
    pub height: f32,
    /// Height of the physical page
    pub page_height: f32,
    pub elements: Vec<Element>,
}

impl Surface {
    /// All text runs, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Labels of all image slots, in drawing order
    pub fn image_labels(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Image { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Frame(_)))
            .count()
    }

    /// Whether content runs past the bottom of the physical page
    pub fn overflows(&self) -> bool {
        self.height > self.page_height
    }
}

/// Top-down layout helper shared by the page renderers.
pub(crate) struct SurfaceBuilder<'a> {
    options: &'a ReportOptions,
    page_number: usize,
    total_pages: usize,
    width: f32,
    page_height: f32,
    left: f32,
    right: f32,
    bottom_margin: f32,
    cursor: f32,
    elements: Vec<Element>,
}

impl<'a> SurfaceBuilder<'a> {
    pub fn new(options: &'a ReportOptions, (page_number, total_pages): (usize, usize)) -> Self {
        let (width, page_height) = options.page_size_pt();
        let margins = &options.margins;
        Self {
            options,
            page_number,
            total_pages,
            width,
            page_height,
            left: mm_to_pt(margins.left_mm),
            right: width - mm_to_pt(margins.right_mm),
            bottom_margin: mm_to_pt(margins.bottom_mm),
            cursor: mm_to_pt(margins.top_mm),
            elements: Vec::new(),
        }
    }

    pub fn options(&self) -> &ReportOptions {
        self.options
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn content_width(&self) -> f32 {
        self.right - self.left
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Bottom of the usable area on the first physical page
    pub fn page_content_bottom(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    pub fn gap(&mut self, amount: f32) {
        self.cursor += amount;
    }

    /// Write one line at the cursor and advance past it.
    pub fn line(&mut self, text: impl Into<String>, size: f32, style: FontStyle) {
        self.text_at(self.left, text, size, style);
        self.advance(size);
    }

    /// Write text on the current line without advancing.
    pub fn text_at(&mut self, x: f32, text: impl Into<String>, size: f32, style: FontStyle) {
        self.elements.push(Element::Text {
            x,
            baseline: self.cursor + size,
            size,
            style,
            text: text.into(),
        });
    }

    /// Write text whose top edge sits at `top`, independent of the cursor.
    pub fn text_at_top(
        &mut self,
        x: f32,
        top: f32,
        text: impl Into<String>,
        size: f32,
        style: FontStyle,
    ) {
        self.elements.push(Element::Text {
            x,
            baseline: top + size,
            size,
            style,
            text: text.into(),
        });
    }

    pub fn advance(&mut self, size: f32) {
        self.cursor += size * LINE_HEIGHT_RATIO;
    }

    pub fn heading(&mut self, text: &str) {
        let size = self.options.heading_font_size_pt;
        self.gap(size * 0.5);
        self.line(text, size, FontStyle::Bold);
    }

    pub fn rule(&mut self) {
        self.elements.push(Element::Rule {
            x1: self.left,
            y1: self.cursor,
            x2: self.right,
            y2: self.cursor,
        });
        self.gap(RULE_WIDTH * 4.0);
    }

    pub fn frame(&mut self, rect: Rect) {
        self.elements.push(Element::Frame(rect));
    }

    pub fn image(&mut self, rect: Rect, label: impl Into<String>, data: Option<Bytes>) {
        self.elements.push(Element::Image {
            rect,
            label: label.into(),
            data,
        });
    }

    /// Append the footer and produce the surface.
    pub fn finish(mut self) -> Surface {
        let content_bottom = self.cursor + self.bottom_margin;

        let baseline = self.page_height - self.bottom_margin / 2.0;
        let footer_rule = baseline - FOOTER_FONT_SIZE * LINE_HEIGHT_RATIO;
        self.elements.push(Element::Rule {
            x1: self.left,
            y1: footer_rule,
            x2: self.right,
            y2: footer_rule,
        });
        self.elements.push(Element::Text {
            x: self.left,
            baseline,
            size: FOOTER_FONT_SIZE,
            style: FontStyle::Regular,
            text: self.options.footer_text.clone(),
        });

        let pagination = format!("Page {} / {}", self.page_number, self.total_pages);
        let pagination_width =
            pagination.chars().count() as f32 * FOOTER_FONT_SIZE * HELVETICA_CHAR_WIDTH_RATIO;
        self.elements.push(Element::Text {
            x: self.right - pagination_width,
            baseline,
            size: FOOTER_FONT_SIZE,
            style: FontStyle::Regular,
            text: pagination,
        });

        Surface {
            page_number: self.page_number,
            total_pages: self.total_pages,
            width: self.width,
            height: content_bottom.max(self.page_height),
            page_height: self.page_height,
            elements: self.elements,
        }
    }
}
