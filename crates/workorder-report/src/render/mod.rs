//! Page rendering
//!
//! Turns one planned page into a [`Surface`]: a flat list of positioned
//! text runs, rules, frames and image slots sized to the physical page.
//! Rendering is pure; nothing is encoded or written here.

mod photo_page;
mod surface;
mod text_page;
mod wrap;

pub use surface::*;
pub use wrap::wrap_text;

use crate::layout::{PageDescriptor, PagePlan};
use crate::options::ReportOptions;
use workorder_core::WorkOrder;

/// Render a single planned page.
pub fn render_page(order: &WorkOrder, page: &PageDescriptor, options: &ReportOptions) -> Surface {
    match page {
        PageDescriptor::Text {
            fields,
            header,
            signatures,
            page_number,
            total_pages,
        } => text_page::render(
            order,
            fields,
            *header,
            *signatures,
            (*page_number, *total_pages),
            options,
        ),
        PageDescriptor::Photos {
            photos,
            page_number,
            total_pages,
        } => photo_page::render(order, photos, (*page_number, *total_pages), options),
    }
}

/// Render every page of a plan, in plan order.
pub fn render_plan(order: &WorkOrder, plan: &PagePlan, options: &ReportOptions) -> Vec<Surface> {
    plan.pages
        .iter()
        .map(|page| render_page(order, page, options))
        .collect()
}
