use serde::{Deserialize, Serialize};

/// Line budgets shared by the edit boundary and the pagination planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineLimits {
    /// Average characters that fit on one rendered line of free text.
    pub avg_chars_per_line: usize,
    /// Cap on tasks + status, enforced when editing.
    pub tasks_status_limit: usize,
    /// Cap on products + remarks, enforced when editing.
    pub products_remarks_limit: usize,
    /// Above this many lines in total the report splits into two text pages.
    pub total_content_limit: usize,
    /// Largest quantity a single line item may carry.
    pub max_quantity: u32,
}

impl Default for LineLimits {
    fn default() -> Self {
        Self {
            avg_chars_per_line: 45,
            tasks_status_limit: 30,
            products_remarks_limit: 30,
            total_content_limit: 20,
            max_quantity: 20,
        }
    }
}
