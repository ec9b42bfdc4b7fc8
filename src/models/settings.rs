// Settings Model
// Application-wide configuration

use serde::{Deserialize, Serialize};

use super::TransitionType;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_hardware_model() -> String {
    "ATEM Mini Pro ISO".to_string()
}

fn default_start_scene_id() -> String {
    "scene_start".to_string()
}

fn default_preview_scene_id() -> String {
    "scene_talk".to_string()
}

/// Studio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioSettings {
    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Transition used by TAKE until the operator changes it
    #[serde(default)]
    pub default_transition: TransitionType,
    #[serde(default = "default_hardware_model")]
    pub hardware_model: String,
    /// Scene put on PGM at startup
    #[serde(default = "default_start_scene_id")]
    pub start_scene_id: String,
    /// Scene staged on PVW at startup
    #[serde(default = "default_preview_scene_id")]
    pub preview_scene_id: String,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_transition: TransitionType::default(),
            hardware_model: default_hardware_model(),
            start_scene_id: default_start_scene_id(),
            preview_scene_id: default_preview_scene_id(),
        }
    }
}

impl StudioSettings {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
