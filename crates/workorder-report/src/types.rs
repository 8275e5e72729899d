use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages could be captured ({} failed)", .failures.len())]
    NoPagesCaptured { failures: Vec<CaptureError> },
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// A single page that could not be captured. The page is skipped and the
/// rest of the report still goes out.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("page {page_number} could not be captured: {reason}")]
pub struct CaptureError {
    pub page_number: usize,
    pub reason: CaptureFailure,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureFailure {
    #[error("{0} has no image data")]
    MissingImage(String),
    #[error("page image could not be encoded: {0}")]
    Encode(String),
    #[error("surface of {width_px}x{height_px} px cannot be rasterized")]
    TooLarge { width_px: u32, height_px: u32 },
    #[error("surface has no area")]
    EmptySurface,
}

/// Standard paper sizes. Reports are always portrait.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions (width, height) in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Page margins in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMargins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(15.0)
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }
}
