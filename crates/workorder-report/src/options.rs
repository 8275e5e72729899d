use crate::constants::mm_to_pt;
use crate::types::*;
use std::path::PathBuf;
use workorder_core::LineLimits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Report layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReportOptions {
    // Page
    pub paper_size: PaperSize,
    pub margins: PageMargins,

    // Line budgets for planning and wrapping
    pub limits: LineLimits,

    // Typography
    pub title_font_size_pt: f32,
    pub heading_font_size_pt: f32,
    pub body_font_size_pt: f32,
    /// TrueType/OpenType file for text; the system sans-serif when unset
    pub font_file: Option<PathBuf>,
    pub bold_font_file: Option<PathBuf>,

    // Boilerplate
    pub title: String,
    pub footer_text: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margins: PageMargins::default(),
            limits: LineLimits::default(),
            title_font_size_pt: 16.0,
            heading_font_size_pt: 11.0,
            body_font_size_pt: 10.0,
            font_file: None,
            bold_font_file: None,
            title: "Work Order".to_string(),
            footer_text: "Service work order".to_string(),
        }
    }
}

impl ReportOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ReportError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size (width, height) in points
    pub fn page_size_pt(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.paper_size.dimensions_mm();
        if !(w > 0.0 && h > 0.0) {
            return Err(ReportError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }
        if w > h {
            return Err(ReportError::Config(
                "Reports are portrait: paper width must not exceed height".to_string(),
            ));
        }

        let m = &self.margins;
        if [m.top_mm, m.bottom_mm, m.left_mm, m.right_mm]
            .iter()
            .any(|v| *v < 0.0)
        {
            return Err(ReportError::Config("Margins must not be negative".to_string()));
        }
        if m.left_mm + m.right_mm >= w || m.top_mm + m.bottom_mm >= h {
            return Err(ReportError::Config(
                "Margins leave no room for content".to_string(),
            ));
        }

        let sizes = [
            self.title_font_size_pt,
            self.heading_font_size_pt,
            self.body_font_size_pt,
        ];
        if sizes.iter().any(|s| *s <= 0.0) {
            return Err(ReportError::Config("Font sizes must be positive".to_string()));
        }

        if self.bold_font_file.is_some() && self.font_file.is_none() {
            return Err(ReportError::Config(
                "A bold font file needs a regular font file".to_string(),
            ));
        }

        let limits = &self.limits;
        if limits.avg_chars_per_line == 0 {
            return Err(ReportError::Config(
                "Average characters per line must be at least 1".to_string(),
            ));
        }
        if limits.max_quantity == 0 {
            return Err(ReportError::Config(
                "Maximum quantity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
