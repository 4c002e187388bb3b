use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "dict-input.config.json";

/// dict-input configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Reject edits that change keys or value types (overridden by --locked/--unlocked)
    #[serde(default = "default_structure_locked")]
    pub structure_locked: bool,

    /// Editor command for `edit` (falls back to $VISUAL, then $EDITOR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// How many times `edit` reopens the editor after a revert
    #[serde(default = "default_max_edit_rounds")]
    pub max_edit_rounds: usize,
}

fn default_structure_locked() -> bool {
    true
}

fn default_max_edit_rounds() -> usize {
    16
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Editor command to launch for `edit`
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| non_empty_env("VISUAL"))
            .or_else(|| non_empty_env("EDITOR"))
            .unwrap_or_else(|| "vi".to_string())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            structure_locked: default_structure_locked(),
            editor: None,
            max_edit_rounds: default_max_edit_rounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "structureLocked": false,
            "editor": "nano",
            "maxEditRounds": 3
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(!config.structure_locked);
        assert_eq!(config.editor, Some("nano".to_string()));
        assert_eq!(config.max_edit_rounds, 3);
        assert_eq!(config.editor_command(), "nano");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "editor": "code -w" }"#).unwrap();
        assert!(config.structure_locked);
        assert_eq!(config.max_edit_rounds, 16);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.structure_locked);
        assert_eq!(config.editor, None);
        assert_eq!(config.max_edit_rounds, 16);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "structureLocked": false }"#,
        )
        .unwrap();

        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert!(!config.structure_locked);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(Config::load(&dir.path().display().to_string()).is_err());
    }
}
