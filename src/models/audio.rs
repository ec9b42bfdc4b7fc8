// Audio Model
// Mixer channels as captured by setup and persisted alongside sources

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioRole {
    Master,
    Mic,
    Music,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compressor {
    pub threshold: f32,
    pub ratio: f32,
    pub attack: f32,
    pub release: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub threshold: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limiter {
    pub threshold: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioDynamics {
    pub compressor: Compressor,
    pub gate: Gate,
    pub limiter: Limiter,
}

impl Default for AudioDynamics {
    fn default() -> Self {
        Self {
            compressor: Compressor { threshold: -20.0, ratio: 4.0, attack: 10.0, release: 100.0, active: false },
            gate: Gate { threshold: -45.0, active: false },
            limiter: Limiter { threshold: -1.0, active: true },
        }
    }
}

/// Five-band EQ; lowCut in Hz, bands in dB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eq5Band {
    pub low_cut: f32,
    pub low: f32,
    pub low_mid: f32,
    pub high_mid: f32,
    pub high: f32,
}

impl Default for Eq5Band {
    fn default() -> Self {
        Self { low_cut: 80.0, low: 0.0, low_mid: 0.0, high_mid: 0.0, high: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DspConfig {
    pub delay_ms: f32,
    pub pan: f32,
    pub input_gain: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRouting {
    pub to_master: bool,
    pub to_monitor: bool,
    pub to_stream: bool,
    pub to_aux: bool,
}

impl Default for AudioRouting {
    fn default() -> Self {
        Self { to_master: true, to_monitor: true, to_stream: true, to_aux: false }
    }
}

/// AudioChannel - one mixer strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioChannel {
    pub id: String,
    pub label: String,
    /// Fader level 0-100
    pub level: f32,
    pub gain: f32,
    pub pan: f32,
    pub muted: bool,
    pub solo: bool,
    /// Audio follows video
    pub afv: bool,
    #[serde(default)]
    pub peak: f32,
    pub role: AudioRole,
    #[serde(default)]
    pub eq: Eq5Band,
    #[serde(default)]
    pub dynamics: AudioDynamics,
    #[serde(default)]
    pub dsp: DspConfig,
    #[serde(default)]
    pub routing: AudioRouting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ducking_target: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl AudioChannel {
    pub fn new(id: &str, label: &str, role: AudioRole, level: f32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            level,
            gain: 0.0,
            pan: 0.0,
            muted: false,
            solo: false,
            afv: false,
            peak: 0.0,
            role,
            eq: Eq5Band::default(),
            dynamics: AudioDynamics::default(),
            dsp: DspConfig::default(),
            routing: AudioRouting::default(),
            ducking_target: None,
            device_id: None,
        }
    }
}

/// Partial channel update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct AudioChannelUpdate {
    pub label: Option<String>,
    pub level: Option<f32>,
    pub gain: Option<f32>,
    pub pan: Option<f32>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub afv: Option<bool>,
    pub eq: Option<Eq5Band>,
    pub dynamics: Option<AudioDynamics>,
    pub dsp: Option<DspConfig>,
    pub routing: Option<AudioRouting>,
}

/// Mixer layout used before setup has run
pub fn default_audio_channels() -> Vec<AudioChannel> {
    vec![
        AudioChannel::new("master", "MASTER", AudioRole::Master, 80.0),
        AudioChannel { afv: true, ..AudioChannel::new("cam1", "HOST", AudioRole::Mic, 75.0) },
        AudioChannel::new("cam2", "GUEST", AudioRole::Mic, 75.0),
        AudioChannel {
            ducking_target: Some(true),
            ..AudioChannel::new("dj_main", "DJ DECK", AudioRole::Music, 85.0)
        },
    ]
}
