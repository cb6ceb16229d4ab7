//! Runtime Configuration
//!
//! Optional overrides come from a JSON `<script id="todo-config">` block in index.html.

use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

/// Id of the element holding the JSON overrides
pub const CONFIG_ELEMENT_ID: &str = "todo-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Local storage key for the item list
    pub storage_key: String,
    /// Save and restore the list across sessions
    pub persist: bool,
    /// One of off/error/warn/info/debug/trace
    pub log_level: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_key: "todos".to_string(),
            persist: true,
            log_level: "info".to_string(),
        }
    }
}

impl TodoConfig {
    /// Parse overrides; bad JSON means defaults.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Read the config block from the page, if there is one.
    pub fn from_document() -> Self {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content())
            .map(|raw| Self::from_json(&raw))
            .unwrap_or_default()
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }
}
