// Audio Engine
// Mixer channel state; the DSP itself runs outside the core

use crate::models::{default_audio_channels, AudioChannel, AudioChannelUpdate};

pub struct AudioEngine {
    channels: Vec<AudioChannel>,
}

impl AudioEngine {
    pub fn new(channels: Vec<AudioChannel>) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> &[AudioChannel] {
        &self.channels
    }

    pub fn get(&self, id: &str) -> Option<&AudioChannel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Merge fields into a channel; unknown ids are a no-op
    pub fn update_channel(&mut self, id: &str, update: AudioChannelUpdate) -> bool {
        let Some(channel) = self.channels.iter_mut().find(|c| c.id == id) else {
            log::debug!("Audio channel '{}' not found", id);
            return false;
        };

        if let Some(label) = update.label {
            channel.label = label;
        }
        if let Some(level) = update.level {
            channel.level = level.clamp(0.0, 100.0);
        }
        if let Some(gain) = update.gain {
            channel.gain = gain;
        }
        if let Some(pan) = update.pan {
            channel.pan = pan.clamp(-1.0, 1.0);
        }
        if let Some(muted) = update.muted {
            channel.muted = muted;
        }
        if let Some(solo) = update.solo {
            channel.solo = solo;
        }
        if let Some(afv) = update.afv {
            channel.afv = afv;
        }
        if let Some(eq) = update.eq {
            channel.eq = eq;
        }
        if let Some(dynamics) = update.dynamics {
            channel.dynamics = dynamics;
        }
        if let Some(dsp) = update.dsp {
            channel.dsp = dsp;
        }
        if let Some(routing) = update.routing {
            channel.routing = routing;
        }
        true
    }

    pub fn set_muted(&mut self, id: &str, muted: bool) -> bool {
        let updated = self.update_channel(
            id,
            AudioChannelUpdate {
                muted: Some(muted),
                ..Default::default()
            },
        );
        if updated {
            log::info!("Audio '{}' {}", id, if muted { "muted" } else { "unmuted" });
        }
        updated
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new(default_audio_channels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_channel_merges_fields() {
        let mut audio = AudioEngine::default();
        assert!(audio.update_channel(
            "cam2",
            AudioChannelUpdate {
                level: Some(140.0),
                pan: Some(-0.25),
                ..Default::default()
            }
        ));
        let ch = audio.get("cam2").unwrap();
        assert_eq!(ch.level, 100.0);
        assert_eq!(ch.pan, -0.25);
        assert_eq!(ch.label, "GUEST");

        assert!(!audio.update_channel("nope", AudioChannelUpdate::default()));
    }

    #[test]
    fn test_mute_and_unmute() {
        let mut audio = AudioEngine::default();
        assert!(audio.set_muted("cam1", true));
        assert!(audio.get("cam1").unwrap().muted);
        assert!(audio.set_muted("cam1", false));
        assert!(!audio.get("cam1").unwrap().muted);
        assert!(!audio.set_muted("ghost", true));
    }
}
