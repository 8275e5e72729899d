use workorder_core::LineLimits;
use workorder_report::*;

#[test]
fn test_default_options_are_valid() {
    let options = ReportOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.paper_size, PaperSize::A4);
    assert_eq!(options.limits, LineLimits::default());
}

#[test]
fn test_validation_rejects_landscape_paper() {
    let options = ReportOptions {
        paper_size: PaperSize::Custom {
            width_mm: 297.0,
            height_mm: 210.0,
        },
        ..ReportOptions::default()
    };
    match options.validate() {
        Err(ReportError::Config(msg)) => assert!(msg.contains("portrait")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_margins() {
    let mut options = ReportOptions::default();

    options.margins = PageMargins::uniform(-1.0);
    assert!(options.validate().is_err());

    // Left and right margins swallow the whole A4 width
    options.margins = PageMargins::uniform(105.0);
    assert!(options.validate().is_err());

    options.margins = PageMargins::uniform(0.0);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_limits() {
    let mut options = ReportOptions::default();
    options.limits.avg_chars_per_line = 0;
    assert!(options.validate().is_err());

    let mut options = ReportOptions::default();
    options.limits.max_quantity = 0;
    assert!(options.validate().is_err());
}

#[test]
fn test_paper_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));

    let options = ReportOptions::default();
    let (w, h) = options.page_size_pt();
    assert!((w - 595.28).abs() < 0.01);
    assert!((h - 841.89).abs() < 0.01);
    assert!((w / POINTS_PER_MM - 210.0).abs() < 0.001);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = ReportOptions::default();
    options.paper_size = PaperSize::Letter;
    options.margins = PageMargins::uniform(20.0);
    options.limits.total_content_limit = 25;
    options.footer_text = "ACME Service".to_string();

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = ReportOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_options_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    tokio::fs::write(&path, r#"{ "title": "Service Report" }"#)
        .await
        .unwrap();

    let loaded = ReportOptions::load(&path).await.unwrap();
    assert_eq!(loaded.title, "Service Report");
    assert_eq!(loaded.limits, LineLimits::default());
    assert_eq!(loaded.paper_size, PaperSize::A4);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    assert!(matches!(
        ReportOptions::load(&path).await,
        Err(ReportError::Config(_))
    ));
}

#[test]
fn test_bold_font_needs_regular_font() {
    let options = ReportOptions {
        bold_font_file: Some("bold.ttf".into()),
        ..ReportOptions::default()
    };
    assert!(matches!(options.validate(), Err(ReportError::Config(_))));
}

#[test]
fn test_font_files_are_checked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regular.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();

    match FontSet::from_files(&path, None) {
        Err(ReportError::Config(msg)) => assert!(msg.contains("not a usable font")),
        other => panic!("Expected Config error, got {:?}", other),
    }
    assert!(matches!(
        FontSet::from_files(&dir.path().join("missing.ttf"), None),
        Err(ReportError::Io(_))
    ));
}
