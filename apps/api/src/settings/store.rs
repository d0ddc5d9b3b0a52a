use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::errors::AppError;
use crate::models::settings::Settings;

/// File-backed persistence for the admin settings record.
///
/// The store holds only the path; every `load` re-reads and every `save`
/// rewrites the whole file, so callers always see a complete record and the
/// admin edit is a wholesale overwrite, never a merge.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the stored record, or `None` when the file is missing or
    /// unparseable. Never errors; the caller substitutes defaults.
    pub fn load(&self) -> Option<Settings> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("ignoring unparseable settings file {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Full overwrite of the settings file.
    pub fn save(&self, settings: &Settings) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::Settings(format!("create {}: {e}", parent.display())))?;
            }
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| AppError::Settings(format!("serialize settings: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::Settings(format!("write {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("adminSettings.json"))
    }

    #[test]
    fn test_roundtrip_preserves_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let settings = Settings {
            system_prompt: "Du bist Physiotherapeut. {therapyGoal}".to_string(),
            model: "openai/gpt-4".to_string(),
            api_key: "sk-or-abc".to_string(),
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load(), Some(settings));
    }

    #[test]
    fn test_load_returns_none_when_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load(), None);
    }

    #[test]
    fn test_load_returns_none_on_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("adminSettings.json"), "{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_overwrites_whole_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&Settings { api_key: "old-key".to_string(), ..Settings::default() }).unwrap();
        store
            .save(&Settings {
                system_prompt: "Neu".to_string(),
                model: "anthropic/claude-2".to_string(),
                api_key: String::new(),
            })
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.system_prompt, "Neu");
        assert!(!loaded.has_api_key());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("adminSettings.json"));
        store.save(&Settings::default()).unwrap();
        assert!(store.load().is_some());
    }

    #[test]
    fn test_file_uses_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("adminSettings.json")).unwrap();
        assert!(raw.contains("\"systemPrompt\""));
        assert!(raw.contains("\"apiKey\""));
    }
}
