//! Visual line estimation
//!
//! There are no font metrics at form time, so wrapped height is approximated
//! from an average number of characters per line. Rounding is always up:
//! over-estimating overflow is harmless, under-estimating clips content.

use crate::model::{ContentField, LineItem, WorkOrder};

/// Estimate how many rendered lines `text` occupies when wrapped.
///
/// Every explicit line counts at least once, longer lines count
/// `ceil(chars / avg_chars_per_line)` times. An empty string is zero lines.
pub fn estimate_lines(text: &str, avg_chars_per_line: usize) -> usize {
    if text.is_empty() {
        return 0;
    }

    let width = avg_chars_per_line.max(1);
    text.split('\n')
        .map(|segment| {
            let chars = segment.strip_suffix('\r').unwrap_or(segment).chars().count();
            chars.div_ceil(width).max(1)
        })
        .sum()
}

/// Lines taken by the product table: one per unit of every non-blank item.
pub fn product_lines(items: &[LineItem]) -> usize {
    items
        .iter()
        .filter(|item| !item.is_blank())
        .map(|item| item.quantity() as usize)
        .sum()
}

/// Estimated line counts of the four content blocks of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentLines {
    pub tasks: usize,
    pub status: usize,
    pub products: usize,
    pub remarks: usize,
}

impl ContentLines {
    pub fn measure(order: &WorkOrder, avg_chars_per_line: usize) -> Self {
        Self {
            tasks: estimate_lines(order.tasks(), avg_chars_per_line),
            status: estimate_lines(order.status(), avg_chars_per_line),
            products: product_lines(order.line_items()),
            remarks: estimate_lines(order.remarks(), avg_chars_per_line),
        }
    }

    pub fn get(&self, field: ContentField) -> usize {
        match field {
            ContentField::Tasks => self.tasks,
            ContentField::Status => self.status,
            ContentField::Products => self.products,
            ContentField::Remarks => self.remarks,
        }
    }

    pub fn tasks_status(&self) -> usize {
        self.tasks + self.status
    }

    pub fn products_remarks(&self) -> usize {
        self.products + self.remarks
    }

    pub fn total(&self) -> usize {
        self.tasks_status() + self.products_remarks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(estimate_lines("", 40), 0);
    }

    #[test]
    fn test_blank_lines_count_once() {
        assert_eq!(estimate_lines("\n", 40), 2);
        assert_eq!(estimate_lines("a\n\nb", 40), 3);
    }

    #[test]
    fn test_long_line_rounds_up() {
        assert_eq!(estimate_lines(&"x".repeat(41), 40), 2);
        assert_eq!(estimate_lines(&"x".repeat(120), 40), 3);
    }

    #[test]
    fn test_crlf_and_multibyte() {
        assert_eq!(estimate_lines("abcd\r\nefgh", 4), 2);
        assert_eq!(estimate_lines(&"ü".repeat(8), 4), 2);
    }

    #[test]
    fn test_zero_width_treated_as_one() {
        assert_eq!(estimate_lines("abc", 0), 3);
    }
}
