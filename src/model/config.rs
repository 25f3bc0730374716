use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from todo.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Task file, relative to the data directory
    #[serde(default = "default_store_file")]
    pub file: String,
    /// Decode done flags the way older releases did (last record never restores done)
    #[serde(default)]
    pub legacy_done_flag: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_store_file(),
            legacy_done_flag: false,
        }
    }
}

fn default_store_file() -> String {
    "tasks.dat".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Text of the Info dialog. None = name and version.
    #[serde(default)]
    pub info_text: Option<String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            info_text: None,
            colors: HashMap::new(),
        }
    }
}

impl UiConfig {
    /// The Info dialog text, falling back to the program name and version
    pub fn info_text(&self) -> String {
        self.info_text
            .clone()
            .unwrap_or_else(|| format!("todo v{}\nA plain-text to-do list.", env!("CARGO_PKG_VERSION")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.store.file, "tasks.dat");
        assert!(!config.store.legacy_done_flag);
        assert!(config.ui.show_key_hints);
        assert!(config.ui.info_text.is_none());
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config: Config = toml::from_str(
            r##"
[store]
legacy_done_flag = true

[ui.colors]
highlight = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.store.file, "tasks.dat");
        assert!(config.store.legacy_done_flag);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
    }

    #[test]
    fn info_text_fallback_mentions_version() {
        let ui = UiConfig::default();
        assert!(ui.info_text().contains(env!("CARGO_PKG_VERSION")));

        let ui = UiConfig {
            info_text: Some("made by me".into()),
            ..Default::default()
        };
        assert_eq!(ui.info_text(), "made by me");
    }
}
