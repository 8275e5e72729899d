use crate::layout::plan;
use workorder_core::{ContentLines, LineLimits, WorkOrder};

/// Page and line counts of a planned report
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlanSummary {
    pub total_pages: usize,
    pub text_pages: usize,
    pub photo_pages: usize,
    pub photos: usize,
    pub tasks_lines: usize,
    pub status_lines: usize,
    pub products_lines: usize,
    pub remarks_lines: usize,
    pub total_lines: usize,
    pub total_content_limit: usize,
    /// Whether text content was split over two pages
    pub split: bool,
}

/// Summarize the plan for an order
pub fn summarize(order: &WorkOrder, limits: &LineLimits) -> PlanSummary {
    let page_plan = plan(order, limits);
    let ContentLines {
        tasks,
        status,
        products,
        remarks,
    } = page_plan.lines;

    PlanSummary {
        total_pages: page_plan.total_pages(),
        text_pages: page_plan.text_pages(),
        photo_pages: page_plan.photo_pages(),
        photos: order.photos().len(),
        tasks_lines: tasks,
        status_lines: status,
        products_lines: products,
        remarks_lines: remarks,
        total_lines: page_plan.lines.total(),
        total_content_limit: limits.total_content_limit,
        split: page_plan.is_split(),
    }
}
