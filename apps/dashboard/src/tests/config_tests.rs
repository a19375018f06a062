use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_upload_simulation() {
    let settings = resolve_settings(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.upload_simulation(), UploadSimulation::default());
    assert_eq!(settings.upload_tick_ms, 200);
    assert_eq!(settings.upload_step, 5);
    assert_eq!(settings.upload_finalize_ms, 500);
    assert_eq!(settings.log_filter, "info");
    assert!(settings.catalog_path.is_none());
}

#[test]
fn file_values_are_strings_and_overlay_defaults() {
    let file = r#"
        catalog_path = "data/catalog.json"
        upload_tick_ms = "10"
        log_filter = "debug"
    "#;
    let settings = resolve_settings(Some(file), env_from(&[]));
    assert_eq!(settings.catalog_path, Some(PathBuf::from("data/catalog.json")));
    assert_eq!(settings.upload_tick_ms, 10);
    assert_eq!(settings.upload_step, 5);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn environment_overrides_file() {
    let file = r#"upload_step = "10""#;
    let settings = resolve_settings(
        Some(file),
        env_from(&[
            ("APP__UPLOAD_STEP", "25"),
            ("APP__UPLOAD_FINALIZE_MS", "0"),
            ("APP__LOG_FILTER", "warn"),
            ("DASHBOARD_CATALOG_PATH", "/tmp/catalog.json"),
        ]),
    );
    assert_eq!(settings.upload_step, 25);
    assert_eq!(settings.upload_finalize_ms, 0);
    assert_eq!(settings.log_filter, "warn");
    assert_eq!(settings.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
}

#[test]
fn unparseable_values_are_ignored() {
    let settings = resolve_settings(
        Some(r#"upload_tick_ms = "soon""#),
        env_from(&[("APP__UPLOAD_STEP", "300"), ("APP__UPLOAD_FINALIZE_MS", "-1")]),
    );
    assert_eq!(settings.upload_tick_ms, 200);
    assert_eq!(settings.upload_step, 5);
    assert_eq!(settings.upload_finalize_ms, 500);
}

#[test]
fn malformed_file_is_skipped() {
    let settings = resolve_settings(Some("upload_step = 10"), env_from(&[]));
    assert_eq!(settings, Settings::default());
}
