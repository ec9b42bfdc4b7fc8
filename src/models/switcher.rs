// Switcher Model
// Live (PGM) / preview (PVW) cursor, keyers and the hardware mirror

use serde::{Deserialize, Serialize};

/// Transition style used by TAKE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionType {
    #[default]
    Mix,
    Wipe,
    Cut,
    Stinger,
}

/// Downstream keyer flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyerState {
    /// DSK1 drives the scoreboard overlay
    pub dsk1_active: bool,
    /// DSK2 drives the chat lower third
    pub dsk2_active: bool,
    pub chroma_active: bool,
}

/// SwitcherState - which ids are on PGM and PVW
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitcherState {
    /// On-air scene or source id
    pub pgm_id: String,
    /// Staged scene or source id
    pub pvw_id: String,
    pub transitioning: bool,
    pub transition_type: TransitionType,
    /// 0-100
    pub transition_progress: u8,
    pub is_live: bool,
    pub is_recording: bool,
    pub keyer: KeyerState,
    /// Passive mirror of the physical switcher
    pub hardware_sync: HardwareSwitcherState,
}

impl SwitcherState {
    pub fn new(pgm_id: &str, pvw_id: &str) -> Self {
        Self {
            pgm_id: pgm_id.to_string(),
            pvw_id: pvw_id.to_string(),
            transitioning: false,
            transition_type: TransitionType::default(),
            transition_progress: 0,
            is_live: false,
            is_recording: false,
            keyer: KeyerState::default(),
            hardware_sync: HardwareSwitcherState::default(),
        }
    }
}

/// Sync status between the app and a physical switcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    Synced,
    Conflict,
    #[default]
    Offline,
}

/// Tally lamps per bank, as hardware input numbers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub pgm: Vec<u32>,
    pub pvw: Vec<u32>,
}

/// HardwareSwitcherState - read-only mirror of an external switcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSwitcherState {
    pub connected: bool,
    pub model: String,
    pub sync_status: SyncStatus,
    pub tally: Tally,
    /// 0-100
    pub fader_position: u8,
    pub last_external_action: String,
}

impl Default for HardwareSwitcherState {
    fn default() -> Self {
        Self {
            connected: false,
            model: "ATEM Mini Pro ISO".to_string(),
            sync_status: SyncStatus::Offline,
            tally: Tally::default(),
            fader_position: 0,
            last_external_action: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switcher_state_wire_format() {
        let state = SwitcherState::new("cam1", "cam2");
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["pgmId"], "cam1");
        assert_eq!(value["pvwId"], "cam2");
        assert_eq!(value["transitionType"], "MIX");
        assert_eq!(value["keyer"]["dsk1Active"], false);
        assert_eq!(value["hardwareSync"]["syncStatus"], "OFFLINE");
    }
}
