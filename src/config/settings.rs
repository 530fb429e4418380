use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::validation::validate_hint_keys;
use crate::error::JumpError;
use crate::jump::sequence::DEFAULT_HINT_KEYS;

/// What to do when a typed key matches no hint
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedKeyPolicy {
    /// End the round silently
    #[default]
    Cancel,
    /// End the round and report the typed prefix to the user
    Report,
}

/// Jump settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Characters used to build hint sequences, in priority order
    pub hint_keys: String,
    /// Show hint labels in upper case
    pub capitalize_hint: bool,
    /// Don't show a message when a jump is aborted by an unmatched key
    pub mute_notifications: bool,
    /// How an unmatched key ends a single-target jump
    pub unmatched_key: UnmatchedKeyPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hint_keys: DEFAULT_HINT_KEYS.to_string(),
            capitalize_hint: false,
            mute_notifications: false,
            unmatched_key: UnmatchedKeyPolicy::Cancel,
        }
    }
}

impl Settings {
    /// Get the path to the YAML settings file
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("monkey-jump").join("settings.yaml"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let mut settings = Self::load_raw();
        // Sanitize settings to fix any invalid state
        settings.sanitize();
        settings
    }

    /// Load raw settings without sanitization
    fn load_raw() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::debug!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from a YAML file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        serde_yml::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    /// Save settings to disk (YAML format)
    pub fn save(&self) -> Result<(), String> {
        let path = Self::file_path().ok_or("Could not determine config directory")?;
        self.save_to(&path)
    }

    /// Save settings to a YAML file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let contents =
            serde_yml::to_string(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        std::fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))
    }

    /// Reset fields that would make the engine unusable
    pub fn sanitize(&mut self) {
        if let Err(e) = validate_hint_keys(&self.hint_keys) {
            log::warn!("{}; falling back to '{}'", e, DEFAULT_HINT_KEYS);
            self.hint_keys = DEFAULT_HINT_KEYS.to_string();
        }
    }

    /// The validated hint alphabet
    pub fn hint_keys(&self) -> Result<Vec<char>, JumpError> {
        validate_hint_keys(&self.hint_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.hint_keys, "fjdksla;");
        assert!(!settings.capitalize_hint);
        assert!(!settings.mute_notifications);
        assert_eq!(settings.unmatched_key, UnmatchedKeyPolicy::Cancel);
        assert_eq!(settings.hint_keys().unwrap(), vec!['f', 'j', 'd', 'k', 's', 'l', 'a', ';']);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: Settings = serde_yml::from_str("capitalize_hint: true\nunmatched_key: report\n").unwrap();
        assert!(settings.capitalize_hint);
        assert_eq!(settings.unmatched_key, UnmatchedKeyPolicy::Report);
        assert_eq!(settings.hint_keys, DEFAULT_HINT_KEYS);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");
        let settings = Settings {
            hint_keys: "asdf".to_string(),
            capitalize_hint: true,
            mute_notifications: true,
            unmatched_key: UnmatchedKeyPolicy::Report,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load_from(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "hint_keys: [not, a, string]\n").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_sanitize_resets_invalid_keys() {
        let mut settings = Settings {
            hint_keys: "aa".to_string(),
            ..Settings::default()
        };
        assert!(settings.hint_keys().is_err());
        settings.sanitize();
        assert_eq!(settings.hint_keys, DEFAULT_HINT_KEYS);
    }
}
