use workorder_report::PaperSize;
use workorder_runtime::*;

#[tokio::test]
async fn test_save_and_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = AppConfig::default();
    config.report.paper_size = PaperSize::Letter;
    config.nas_endpoint = Some("http://nas.local/upload".to_string());
    config.share_command = Some("xdg-share".to_string());

    config.save(&path).await.unwrap();
    let loaded = AppConfig::load(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, r#"{ "email_recipient": "office@example.com" }"#)
        .await
        .unwrap();

    let loaded = AppConfig::load(&path).await.unwrap();
    assert_eq!(loaded.email_recipient.as_deref(), Some("office@example.com"));
    assert_eq!(loaded.report, ReportOptions::default());
    assert!(loaded.nas_endpoint.is_none());
}

#[tokio::test]
async fn test_invalid_report_options_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, r#"{ "report": { "body_font_size_pt": -1.0 } }"#)
        .await
        .unwrap();

    assert!(matches!(
        AppConfig::load(&path).await,
        Err(ConfigError::Report(_))
    ));
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        AppConfig::load(dir.path().join("absent.json")).await,
        Err(ConfigError::Io(_))
    ));
}
