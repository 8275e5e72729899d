//! Work order report generation
//!
//! The pipeline runs in fixed stages:
//! 1. Estimate line counts and plan pages ([`plan`])
//! 2. Render each planned page to a [`Surface`] ([`render_page`])
//! 3. Capture surfaces one by one and assemble the PDF ([`assemble`])

mod assemble;
mod capture;
mod constants;
mod fonts;
pub mod layout;
mod options;
mod pipeline;
pub mod render;
mod stats;
mod types;

pub use assemble::{AssembledReport, assemble, assemble_sync, assemble_with, save_report};
pub use capture::{CapturedPage, RasterCapturer, SurfaceCapturer};
pub use constants::*;
pub use fonts::{FontFace, FontSet};
pub use layout::{PageDescriptor, PagePlan, plan};
pub use options::*;
pub use pipeline::{generate_report, report_file_name};
pub use render::{Surface, render_page, render_plan};
pub use stats::{PlanSummary, summarize};
pub use types::*;
