use proptest::prelude::*;
use workorder_core::*;

#[test]
fn test_single_line_of_three_widths() {
    let avg = 45;
    assert_eq!(estimate_lines(&"a".repeat(avg * 3), avg), 3);
}

#[test]
fn test_empty_text_is_zero_lines() {
    assert_eq!(estimate_lines("", 45), 0);
    assert_eq!(estimate_lines("", 1), 0);
}

#[test]
fn test_product_lines_skip_blank_items() {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    assert_eq!(product_lines(order.line_items()), 0);

    let id = order.line_items()[0].id();
    let order = order
        .apply_all(
            [
                Edit::SetItemName {
                    id,
                    name: "Router".into(),
                },
                Edit::SetQuantity { id, quantity: 3 },
                Edit::AddLineItem,
            ],
            &limits,
        )
        .unwrap();

    // The second, untouched item contributes nothing.
    assert_eq!(order.line_items().len(), 2);
    assert_eq!(product_lines(order.line_items()), 3);
}

#[test]
fn test_serial_only_item_counts() {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    let id = order.line_items()[0].id();
    let order = order
        .apply(
            Edit::SetSerialNumber {
                id,
                index: 0,
                value: "SN-1".into(),
            },
            &limits,
        )
        .unwrap();
    assert_eq!(product_lines(order.line_items()), 1);
}

#[test]
fn test_content_lines_totals() {
    let limits = LineLimits::default();
    let order = WorkOrder::new()
        .apply_all(
            [
                Edit::SetTasks("one\ntwo".into()),
                Edit::SetStatus("done".into()),
                Edit::SetRemarks("x".repeat(limits.avg_chars_per_line + 1)),
            ],
            &limits,
        )
        .unwrap();

    let lines = ContentLines::measure(&order, limits.avg_chars_per_line);
    assert_eq!(lines.tasks, 2);
    assert_eq!(lines.status, 1);
    assert_eq!(lines.products, 0);
    assert_eq!(lines.remarks, 2);
    assert_eq!(lines.tasks_status(), 3);
    assert_eq!(lines.products_remarks(), 2);
    assert_eq!(lines.total(), 5);
    assert_eq!(lines.get(ContentField::Remarks), 2);
}

proptest! {
    #[test]
    fn prop_text_covers_each_of_its_lines(text in "[a-z \\n]{0,200}", avg in 1usize..80) {
        let total = estimate_lines(&text, avg);
        for line in text.split('\n') {
            prop_assert!(total >= estimate_lines(line, avg));
        }
    }

    #[test]
    fn prop_appending_never_shrinks(text in "[a-z\\n]{0,120}", extra in "[a-z\\n]{0,40}", avg in 1usize..60) {
        let combined = format!("{text}{extra}");
        prop_assert!(estimate_lines(&combined, avg) >= estimate_lines(&text, avg));
    }

    #[test]
    fn prop_nonempty_text_has_a_line(text in "[a-z\\n]{1,80}", avg in 1usize..60) {
        prop_assert!(estimate_lines(&text, avg) >= 1);
    }
}
