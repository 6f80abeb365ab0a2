use std::{fs, path::Path};

use anyhow::Context;
use dispatch::{DispatchConfig, HostCapabilities};
use serde::Deserialize;
use shared::domain::Vocabulary;

pub const DEFAULT_SETTINGS_FILE: &str = "faketouch.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub target: String,
    pub vocabulary: Vocabulary,
    pub prefixed_pointer_names: bool,
    pub strict_phases: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: "surface".into(),
            vocabulary: Vocabulary::Touch,
            prefixed_pointer_names: true,
            strict_phases: false,
        }
    }
}

impl Settings {
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            vocabulary: self.vocabulary,
            prefixed_pointer_names: self.prefixed_pointer_names,
            strict_phases: self.strict_phases,
            host: HostCapabilities::detected(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    target: Option<String>,
    vocabulary: Option<Vocabulary>,
    prefixed_pointer_names: Option<bool>,
    strict_phases: Option<bool>,
}

/// Defaults, then the settings file (if present), then the environment.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    }

    apply_env(&mut settings, lookup)?;
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.target {
        settings.target = v;
    }
    if let Some(v) = file_cfg.vocabulary {
        settings.vocabulary = v;
    }
    if let Some(v) = file_cfg.prefixed_pointer_names {
        settings.prefixed_pointer_names = v;
    }
    if let Some(v) = file_cfg.strict_phases {
        settings.strict_phases = v;
    }
    Ok(())
}

/// `FAKETOUCH_*` variables, with `APP__*` taking precedence.
fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let var = |name: &str| lookup(&format!("APP__{name}")).or_else(|| lookup(&format!("FAKETOUCH_{name}")));

    if let Some(v) = var("TARGET") {
        settings.target = v;
    }
    if let Some(v) = var("VOCABULARY") {
        settings.vocabulary = v.parse()?;
    }
    if let Some(v) = var("PREFIXED_POINTER_NAMES") {
        settings.prefixed_pointer_names = parse_bool(&v)?;
    }
    if let Some(v) = var("STRICT_PHASES") {
        settings.strict_phases = parse_bool(&v)?;
    }
    Ok(())
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
