use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::preferences::PreferenceStore;
use super::preferences::LOCALE_STORAGE_KEY;
use super::preferences::THEME_STORAGE_KEY;
use super::state::DEFAULT_LOG_CAPACITY;
use super::state::DEFAULT_UNDO_LIMIT;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    pub undo_limit: usize,
    pub log_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `jxe_core=debug`.
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Option<String>,
    pub theme: Option<String>,
}

/// The `[ui]` table doubles as the preference store for hosts without one.
impl PreferenceStore for UiConfig {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            LOCALE_STORAGE_KEY => self.locale.clone(),
            THEME_STORAGE_KEY => self.theme.clone(),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            LOCALE_STORAGE_KEY => self.locale = Some(value.to_string()),
            THEME_STORAGE_KEY => self.theme = Some(value.to_string()),
            _ => {}
        }
    }
}
