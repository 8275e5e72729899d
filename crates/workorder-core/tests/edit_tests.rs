use proptest::prelude::*;
use workorder_core::*;

fn first_id(order: &WorkOrder) -> LineItemId {
    order.line_items()[0].id()
}

#[test]
fn test_new_order_defaults() {
    let order = WorkOrder::new();
    assert_eq!(order.line_items().len(), 1);
    let item = &order.line_items()[0];
    assert_eq!(item.quantity(), 1);
    assert_eq!(item.serial_numbers(), &[String::new()]);
    assert!(item.is_blank());
    assert!(order.photos().is_empty());
    assert!(order.signature(SignatureRole::Customer).is_none());
    assert!(order.signature(SignatureRole::Technician).is_none());
}

#[test]
fn test_apply_leaves_original_untouched() {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    let next = order
        .apply(Edit::SetServiceUnit("Unit 7".into()), &limits)
        .unwrap();

    assert_eq!(order.service_unit(), "");
    assert_eq!(next.service_unit(), "Unit 7");
}

#[test]
fn test_quantity_resizes_serials_from_the_end() {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    let id = first_id(&order);

    let order = order
        .apply_all(
            [
                Edit::SetQuantity { id, quantity: 3 },
                Edit::SetSerialNumber {
                    id,
                    index: 0,
                    value: "A".into(),
                },
                Edit::SetSerialNumber {
                    id,
                    index: 1,
                    value: "B".into(),
                },
                Edit::SetSerialNumber {
                    id,
                    index: 2,
                    value: "C".into(),
                },
            ],
            &limits,
        )
        .unwrap();
    assert_eq!(order.line_item(id).unwrap().serial_numbers(), &["A", "B", "C"]);

    let shrunk = order.apply(Edit::SetQuantity { id, quantity: 2 }, &limits).unwrap();
    assert_eq!(shrunk.line_item(id).unwrap().serial_numbers(), &["A", "B"]);

    let grown = shrunk.apply(Edit::SetQuantity { id, quantity: 4 }, &limits).unwrap();
    assert_eq!(
        grown.line_item(id).unwrap().serial_numbers(),
        &["A", "B", "", ""]
    );
}

#[test]
fn test_quantity_bounds() {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    let id = first_id(&order);

    assert_eq!(
        order.apply(Edit::SetQuantity { id, quantity: 0 }, &limits),
        Err(ValidationError::QuantityOutOfRange {
            quantity: 0,
            max: limits.max_quantity
        })
    );
    assert!(matches!(
        order.apply(
            Edit::SetQuantity {
                id,
                quantity: limits.max_quantity + 1
            },
            &limits
        ),
        Err(ValidationError::QuantityOutOfRange { .. })
    ));
}

#[test]
fn test_ids_are_stable_across_removal() {
    let limits = LineLimits::default();
    let order = WorkOrder::new()
        .apply_all([Edit::AddLineItem, Edit::AddLineItem], &limits)
        .unwrap();
    let ids: Vec<_> = order.line_items().iter().map(|item| item.id()).collect();
    assert_eq!(ids.len(), 3);

    let order = order.apply(Edit::RemoveLineItem(ids[1]), &limits).unwrap();
    let order = order
        .apply(
            Edit::SetItemName {
                id: ids[2],
                name: "Switch".into(),
            },
            &limits,
        )
        .unwrap();

    assert_eq!(order.line_items().len(), 2);
    assert_eq!(order.line_item(ids[2]).unwrap().name(), "Switch");
    assert!(order.line_item(ids[1]).is_none());

    // A removed id is never handed out again.
    let order = order.apply(Edit::AddLineItem, &limits).unwrap();
    let new_id = order.line_items().last().unwrap().id();
    assert!(!ids.contains(&new_id));
}

#[test]
fn test_unknown_item_rejected() {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    assert_eq!(
        order.apply(Edit::RemoveLineItem(LineItemId(99)), &limits),
        Err(ValidationError::UnknownLineItem(LineItemId(99)))
    );
    assert!(matches!(
        order.apply(
            Edit::SetSerialNumber {
                id: first_id(&order),
                index: 5,
                value: "x".into()
            },
            &limits
        ),
        Err(ValidationError::SerialIndexOutOfRange { index: 5, .. })
    ));
}

#[test]
fn test_tasks_status_limit() {
    let limits = LineLimits {
        tasks_status_limit: 4,
        ..Default::default()
    };
    let order = WorkOrder::new()
        .apply(Edit::SetTasks("1\n2\n3".into()), &limits)
        .unwrap();

    let refused = order.apply(Edit::SetStatus("a\nb".into()), &limits);
    assert_eq!(
        refused,
        Err(ValidationError::TasksStatusLimit { lines: 5, limit: 4 })
    );
    assert_eq!(order.status(), "");

    assert!(order.apply(Edit::SetStatus("a".into()), &limits).is_ok());
}

#[test]
fn test_products_remarks_limit_counts_quantities() {
    let limits = LineLimits {
        products_remarks_limit: 5,
        ..Default::default()
    };
    let order = WorkOrder::new();
    let id = first_id(&order);
    let order = order
        .apply_all(
            [
                Edit::SetItemName {
                    id,
                    name: "Sensor".into(),
                },
                Edit::SetQuantity { id, quantity: 4 },
                Edit::SetRemarks("fine".into()),
            ],
            &limits,
        )
        .unwrap();

    assert!(matches!(
        order.apply(Edit::SetQuantity { id, quantity: 5 }, &limits),
        Err(ValidationError::ProductsRemarksLimit { lines: 6, limit: 5 })
    ));
}

#[test]
fn test_shrinking_edit_allowed_over_limit() {
    let loose = LineLimits::default();
    let order = WorkOrder::new()
        .apply(Edit::SetTasks("1\n2\n3\n4\n5".into()), &loose)
        .unwrap();

    let tight = LineLimits {
        tasks_status_limit: 2,
        ..Default::default()
    };
    let order = order.apply(Edit::SetTasks("1\n2\n3".into()), &tight).unwrap();
    assert_eq!(order.tasks(), "1\n2\n3");
}

#[test]
fn test_photos_and_signatures() {
    let limits = LineLimits::default();
    let order = WorkOrder::new()
        .apply_all(
            [
                Edit::AddPhoto(Photo::new(vec![1u8]).with_name("a.jpg")),
                Edit::AddPhoto(Photo::new(vec![2u8])),
                Edit::AddPhoto(Photo::new(vec![3u8])),
                Edit::SaveSignature {
                    role: SignatureRole::Technician,
                    signature: Signature::new(vec![9u8]),
                },
            ],
            &limits,
        )
        .unwrap();

    let order = order.apply(Edit::RemovePhoto(1), &limits).unwrap();
    let payloads: Vec<u8> = order.photos().iter().map(|p| p.data[0]).collect();
    assert_eq!(payloads, vec![1, 3]);
    assert_eq!(order.photos()[0].name.as_deref(), Some("a.jpg"));

    assert_eq!(
        order.apply(Edit::RemovePhoto(2), &limits),
        Err(ValidationError::PhotoIndexOutOfRange(2))
    );

    assert!(order.signature(SignatureRole::Technician).is_some());
    let order = order
        .apply(Edit::ClearSignature(SignatureRole::Technician), &limits)
        .unwrap();
    assert!(order.signature(SignatureRole::Technician).is_none());
}

proptest! {
    #[test]
    fn prop_serials_track_quantity(
        quantities in proptest::collection::vec(1u32..=20, 1..10),
    ) {
        let limits = LineLimits {
            products_remarks_limit: usize::MAX,
            ..Default::default()
        };
        let mut order = WorkOrder::new();
        let id = first_id(&order);
        order = order.apply(Edit::SetItemName { id, name: "Cable".into() }, &limits).unwrap();

        for (step, quantity) in quantities.into_iter().enumerate() {
            let before = order.line_item(id).unwrap().serial_numbers().to_vec();
            order = order.apply(Edit::SetQuantity { id, quantity }, &limits).unwrap();
            let item = order.line_item(id).unwrap();

            prop_assert_eq!(item.serial_numbers().len(), quantity as usize);
            let kept = before.len().min(quantity as usize);
            prop_assert_eq!(&item.serial_numbers()[..kept], &before[..kept]);

            let last = quantity as usize - 1;
            order = order
                .apply(
                    Edit::SetSerialNumber { id, index: last, value: format!("S{step}") },
                    &limits,
                )
                .unwrap();
        }
    }
}
