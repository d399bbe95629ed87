use invoice_core::{ExportConfig, PageGeometry, TrailingPage};

#[test]
fn defaults_are_a4_and_faithful() {
    let config = ExportConfig::default();
    assert_eq!(config.page, PageGeometry::a4());
    assert_eq!(config.page.width, 210.0);
    assert_eq!(config.page.height, 297.0);
    assert_eq!(config.trailing_page, TrailingPage::Preserve);
    assert!(config.compress);
}

#[test]
fn partial_json_keeps_defaults() {
    let config: ExportConfig =
        serde_json::from_str(r#"{"trailing_page": "trim", "title": "Tax Invoice"}"#).unwrap();
    assert_eq!(config.trailing_page, TrailingPage::Trim);
    assert_eq!(config.title.as_deref(), Some("Tax Invoice"));
    assert_eq!(config.page, PageGeometry::a4());
    assert_eq!(config.creator, "invoice-core");
}

#[test]
fn trailing_page_parses_case_insensitively() {
    assert_eq!("TRIM".parse::<TrailingPage>().unwrap(), TrailingPage::Trim);
    assert_eq!(" preserve ".parse::<TrailingPage>().unwrap(), TrailingPage::Preserve);
    assert!("drop".parse::<TrailingPage>().is_err());
}
