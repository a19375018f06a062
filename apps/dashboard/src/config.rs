use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use dashboard_core::UploadSimulation;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub catalog_path: Option<PathBuf>,
    pub upload_tick_ms: u64,
    pub upload_step: u8,
    pub upload_finalize_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let simulation = UploadSimulation::default();
        Self {
            catalog_path: None,
            upload_tick_ms: simulation.tick.as_millis() as u64,
            upload_step: simulation.step,
            upload_finalize_ms: simulation.finalize_delay.as_millis() as u64,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn upload_simulation(&self) -> UploadSimulation {
        UploadSimulation {
            tick: Duration::from_millis(self.upload_tick_ms),
            step: self.upload_step,
            finalize_delay: Duration::from_millis(self.upload_finalize_ms),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the toml file (string values), then environment overrides.
/// Values that do not parse are ignored.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            apply(&mut settings, |key| file_cfg.get(key).cloned());
        }
    }

    apply(&mut settings, |key| {
        env(&format!("APP__{}", key.to_ascii_uppercase()))
    });
    if let Some(v) = env("DASHBOARD_CATALOG_PATH") {
        settings.catalog_path = Some(PathBuf::from(v));
    }

    settings
}

fn apply(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("catalog_path") {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(parsed) = lookup("upload_tick_ms").and_then(|v| v.parse().ok()) {
        settings.upload_tick_ms = parsed;
    }
    if let Some(parsed) = lookup("upload_step").and_then(|v| v.parse().ok()) {
        settings.upload_step = parsed;
    }
    if let Some(parsed) = lookup("upload_finalize_ms").and_then(|v| v.parse().ok()) {
        settings.upload_finalize_ms = parsed;
    }
    if let Some(v) = lookup("log_filter") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
