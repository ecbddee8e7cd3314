use crate::reducer::{ViewMode, DEFAULT_DOCUMENT_KEY};
use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "pagekit.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Seeds block ids for the session
    #[serde(default = "default_document_key")]
    pub document_key: String,

    #[serde(default)]
    pub initial_view_mode: ViewMode,

    /// Select the first block when the editor opens
    #[serde(default = "default_select_first_block")]
    pub select_first_block: bool,
}

fn default_document_key() -> String {
    DEFAULT_DOCUMENT_KEY.to_string()
}

fn default_select_first_block() -> bool {
    true
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults if absent
    pub fn load(cwd: &Path) -> Result<Self, EditorError> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            document_key: default_document_key(),
            initial_view_mode: ViewMode::Editing,
            select_first_block: default_select_first_block(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "documentKey": "pricing",
            "initialViewMode": "preview",
            "selectFirstBlock": false
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.document_key, "pricing");
        assert_eq!(config.initial_view_mode, ViewMode::Preview);
        assert!(!config.select_first_block);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "documentKey": "x" }"#).unwrap();
        assert_eq!(config.initial_view_mode, ViewMode::Editing);
        assert!(config.select_first_block);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "initialViewMode": "preview" }"#,
        )
        .unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.initial_view_mode, ViewMode::Preview);
        assert_eq!(config.document_key, "page");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(matches!(EditorConfig::load(dir.path()), Err(EditorError::Config(_))));
    }
}
