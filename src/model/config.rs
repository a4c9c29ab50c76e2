use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanesConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub drag: DragConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides applied on top of whichever theme is active,
    /// e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Cells the pointer must travel after a press before it becomes a drag
    #[serde(default = "default_drag_threshold")]
    pub threshold: u16,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            threshold: default_drag_threshold(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_drag_threshold() -> u16 {
    1
}

/// Persisted display theme. Independent of board data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemePreference::Dark => write!(f, "dark"),
            ThemePreference::Light => write!(f, "light"),
        }
    }
}
