//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the romanization table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::command::{Command, Shortcut};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub input: InputSettings,
    #[serde(default)]
    shortcuts: BTreeMap<String, Command>,
    #[serde(skip)]
    shortcuts_parsed: Vec<(Shortcut, Command)>,
}

impl Settings {
    /// Command bound to a key chord, if any.
    pub fn shortcut_for(
        &self,
        key: &str,
        ctrl: bool,
        alt: bool,
        meta: bool,
        shift: bool,
    ) -> Option<Command> {
        self.shortcuts_parsed
            .iter()
            .find(|(s, _)| s.matches(key, ctrl, alt, meta, shift))
            .map(|(_, c)| *c)
    }

    pub fn default_settings() -> Settings {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub key: String,
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub transliterate: bool,
    pub max_word_chars: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.shortcuts_parsed = parse_shortcuts(&s.shortcuts)?;
    Ok(s)
}

fn parse_shortcuts(
    raw: &BTreeMap<String, Command>,
) -> Result<Vec<(Shortcut, Command)>, SettingsError> {
    let mut result = Vec::new();
    for (chord, command) in raw {
        let shortcut = Shortcut::parse(chord).ok_or_else(|| SettingsError::InvalidValue {
            field: format!("shortcuts.{chord}"),
            reason: "expected [modifier+]...key, e.g. \"ctrl+b\"".to_string(),
        })?;
        result.push((shortcut, *command));
    }
    Ok(result)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.storage.key.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "storage.key".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if s.input.max_word_chars == 0 {
        return Err(SettingsError::InvalidValue {
            field: "input.max_word_chars".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}
