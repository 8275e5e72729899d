//! End-to-end report generation

use crate::assemble::{AssembledReport, assemble};
use crate::layout::plan;
use crate::options::ReportOptions;
use crate::render::render_plan;
use crate::types::*;
use workorder_core::WorkOrder;

/// Estimate, plan, render, capture and assemble one order.
pub async fn generate_report(
    order: &WorkOrder,
    options: &ReportOptions,
) -> Result<AssembledReport> {
    options.validate()?;

    let page_plan = plan(order, &options.limits);
    let surfaces = render_plan(order, &page_plan, options);
    log::debug!(
        "Rendered {} surface(s), {} overflowing",
        surfaces.len(),
        surfaces.iter().filter(|s| s.overflows()).count()
    );

    assemble(surfaces, options).await
}

/// File name for an order's report: `work-order_<unit>_<date>.pdf`.
///
/// Characters outside `[A-Za-z0-9._-]` in the unit become `-`. The unit
/// part is left out when it is empty.
pub fn report_file_name(order: &WorkOrder) -> String {
    let date = order.date_time().format("%Y-%m-%d");
    let unit = sanitize(order.service_unit());
    if unit.is_empty() {
        format!("work-order_{}.pdf", date)
    } else {
        format!("work-order_{}_{}.pdf", unit, date)
    }
}

fn sanitize(text: &str) -> String {
    let mapped: String = text
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_matches(|c| c == '-' || c == '.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(" Unit 7/B "), "Unit-7-B");
        assert_eq!(sanitize("../etc"), "etc");
        assert_eq!(sanitize("   "), "");
    }
}
