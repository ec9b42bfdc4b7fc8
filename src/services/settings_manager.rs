// SettingsManager Service
// Handles studio settings persistence

use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::models::StudioSettings;

/// Manages studio settings storage and retrieval
pub struct SettingsManager {
    settings_path: PathBuf,
    cache: RwLock<Option<StudioSettings>>,
}

impl SettingsManager {
    /// Create a new SettingsManager with the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join("settings.json"),
            cache: RwLock::new(None),
        }
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load(&self) -> Result<StudioSettings, String> {
        if let Ok(cache) = self.cache.read() {
            if let Some(ref settings) = *cache {
                return Ok(settings.clone());
            }
        }

        let settings = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)
                .map_err(|e| format!("Failed to read settings: {e}"))?;

            let mut user_value: Value = serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse settings: {e}"))?;

            let defaults_value = serde_json::to_value(StudioSettings::default())
                .map_err(|e| format!("Failed to build default settings: {e}"))?;

            let changed = merge_missing_settings(&mut user_value, &defaults_value);

            let settings: StudioSettings = serde_json::from_value(user_value)
                .map_err(|e| format!("Failed to parse settings: {e}"))?;

            if changed {
                log::debug!("Filled missing settings keys with defaults");
                self.save_internal(&settings)?;
            }

            settings
        } else {
            let defaults = StudioSettings::default();
            self.save_internal(&defaults)?;
            defaults
        };

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(settings.clone());
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, settings: &StudioSettings) -> Result<(), String> {
        self.save_internal(settings)?;

        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(settings.clone());
        }

        Ok(())
    }

    fn save_internal(&self, settings: &StudioSettings) -> Result<(), String> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {e}"))?;
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;

        std::fs::write(&self.settings_path, content)
            .map_err(|e| format!("Failed to write settings: {e}"))
    }
}

/// Recursively add keys present in `defaults` but missing from `target`.
/// Returns true when anything was added.
fn merge_missing_settings(target: &mut Value, defaults: &Value) -> bool {
    match (target, defaults) {
        (Value::Object(target_map), Value::Object(defaults_map)) => {
            let mut changed = false;
            for (key, default_value) in defaults_map {
                match target_map.get_mut(key) {
                    Some(target_value) => {
                        if merge_missing_settings(target_value, default_value) {
                            changed = true;
                        }
                    }
                    None => {
                        target_map.insert(key.clone(), default_value.clone());
                        changed = true;
                    }
                }
            }
            changed
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransitionType;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp = tempdir().unwrap();
        let manager = SettingsManager::new(temp.path().to_path_buf());

        let settings = manager.load().unwrap();

        assert_eq!(settings, StudioSettings::default());
        assert!(temp.path().join("settings.json").exists());
    }

    #[test]
    fn test_partial_file_is_completed() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join("settings.json"),
            r#"{ "logLevel": "debug", "defaultTransition": "WIPE" }"#,
        )
        .unwrap();
        let manager = SettingsManager::new(temp.path().to_path_buf());

        let settings = manager.load().unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.default_transition, TransitionType::Wipe);
        assert_eq!(settings.start_scene_id, "scene_start");

        let on_disk = std::fs::read_to_string(temp.path().join("settings.json")).unwrap();
        assert!(on_disk.contains("previewSceneId"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("settings.json"), "not json").unwrap();
        let manager = SettingsManager::new(temp.path().to_path_buf());

        let err = manager.load().unwrap_err();
        assert!(err.contains("Failed to parse settings"));
    }

    #[test]
    fn test_save_updates_cache() {
        let temp = tempdir().unwrap();
        let manager = SettingsManager::new(temp.path().to_path_buf());
        let mut settings = manager.load().unwrap();
        settings.hardware_model = "ATEM 2 M/E".to_string();

        manager.save(&settings).unwrap();
        std::fs::remove_file(temp.path().join("settings.json")).unwrap();

        assert_eq!(manager.load().unwrap().hardware_model, "ATEM 2 M/E");
    }
}
