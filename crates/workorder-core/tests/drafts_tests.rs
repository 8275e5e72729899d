use tempfile::TempDir;
use workorder_core::*;

fn sample_order() -> WorkOrder {
    let limits = LineLimits::default();
    let order = WorkOrder::new();
    let id = order.line_items()[0].id();
    order
        .apply_all(
            [
                Edit::SetServiceUnit("North Depot".into()),
                Edit::SetContactPerson("R. Jones".into()),
                Edit::SetTasks("Replace filter".into()),
                Edit::SetItemName {
                    id,
                    name: "Filter".into(),
                },
                Edit::SetQuantity { id, quantity: 2 },
                Edit::AddPhoto(Photo::new(vec![0xFF, 0xD8, 0x00])),
                Edit::SaveSignature {
                    role: SignatureRole::Customer,
                    signature: Signature::new(vec![1, 2, 3]),
                },
            ],
            &limits,
        )
        .unwrap()
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = DraftStore::new(dir.path());
    let order = sample_order();

    store.save("job-1", &order).await.unwrap();
    let loaded = store.load("job-1").await.unwrap();

    assert_eq!(loaded, order);
}

#[tokio::test]
async fn test_list_and_delete() {
    let dir = TempDir::new().unwrap();
    let store = DraftStore::new(dir.path().join("drafts"));

    assert!(store.list().await.unwrap().is_empty());

    store.save("beta", &WorkOrder::new()).await.unwrap();
    store.save("alpha", &WorkOrder::new()).await.unwrap();
    std::fs::write(dir.path().join("drafts").join("notes.txt"), "x").unwrap();

    assert_eq!(store.list().await.unwrap(), vec!["alpha", "beta"]);

    store.delete("alpha").await.unwrap();
    assert_eq!(store.list().await.unwrap(), vec!["beta"]);
    assert!(matches!(
        store.delete("alpha").await,
        Err(DraftError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_missing_draft() {
    let dir = TempDir::new().unwrap();
    let store = DraftStore::new(dir.path());
    assert!(matches!(
        store.load("nope").await,
        Err(DraftError::NotFound(name)) if name == "nope"
    ));
}

#[tokio::test]
async fn test_invalid_names() {
    let dir = TempDir::new().unwrap();
    let store = DraftStore::new(dir.path());
    for name in ["", "  ", "../escape", ".hidden", "a/b"] {
        assert!(
            matches!(
                store.save(name, &WorkOrder::new()).await,
                Err(DraftError::InvalidName(_))
            ),
            "name {name:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_legacy_draft_is_migrated() {
    let dir = TempDir::new().unwrap();
    let legacy = r#"{
        "date_time": "2024-03-01T09:30:00",
        "service_unit": "Plant 2",
        "line_items": [
            { "name": "Valve", "quantity": 2, "serial_number": "V-100" },
            { "name": "Gasket", "quantity": 1, "serial_number": "" }
        ],
        "photos": [ { "data": "data:image/jpeg;base64,AQID" } ]
    }"#;
    std::fs::write(dir.path().join("old.json"), legacy).unwrap();

    let store = DraftStore::new(dir.path());
    let order = store.load("old").await.unwrap();

    assert_eq!(order.service_unit(), "Plant 2");
    let items = order.line_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].serial_numbers(), &["V-100", ""]);
    assert_eq!(items[1].serial_numbers(), &[""]);
    assert_ne!(items[0].id(), items[1].id());
    assert_eq!(order.photos()[0].data.as_ref(), &[1, 2, 3]);

    // Fresh ids keep coming after migration.
    let order = order
        .apply(Edit::AddLineItem, &LineLimits::default())
        .unwrap();
    let ids: Vec<_> = order.line_items().iter().map(|item| item.id()).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids[2] != ids[0] && ids[2] != ids[1]);
}

#[tokio::test]
async fn test_oversized_quantity_is_clamped() {
    let dir = TempDir::new().unwrap();
    let draft = r#"{
        "date_time": "2024-03-01T09:30:00",
        "line_items": [
            { "id": 1, "name": "Hose", "quantity": 500, "serial_numbers": [] },
            { "id": 2, "name": "Clamp", "quantity": 4294967295, "serial_numbers": ["C-1"] },
            { "id": 3, "name": "Seal", "quantity": 0, "serial_numbers": [] }
        ]
    }"#;
    std::fs::write(dir.path().join("big.json"), draft).unwrap();

    let order = DraftStore::new(dir.path()).load("big").await.unwrap();
    let max = LineLimits::default().max_quantity;
    let items = order.line_items();
    assert_eq!(items[0].quantity(), max);
    assert_eq!(items[0].serial_numbers().len(), max as usize);
    assert_eq!(items[1].quantity(), max);
    assert_eq!(items[1].serial_numbers()[0], "C-1");
    assert_eq!(items[2].quantity(), 1);

    let tight = LineLimits {
        max_quantity: 3,
        ..LineLimits::default()
    };
    let order = DraftStore::new(dir.path())
        .with_limits(tight)
        .load("big")
        .await
        .unwrap();
    assert_eq!(order.line_items()[0].serial_numbers().len(), 3);
}

#[test]
fn test_migrate_keeps_current_layout() {
    let mut value = serde_json::json!({
        "line_items": [
            { "id": 4, "name": "A", "quantity": 1, "serial_numbers": ["x"] }
        ]
    });
    let before = value.clone();
    migrate_draft(&mut value);
    assert_eq!(value, before);
}
