// Automation Service
// Steps through macro actions against the studio. WAIT steps hand control
// back to the caller, which schedules the resume.

use std::time::Duration;

use crate::models::{Macro, MacroAction};
use crate::services::Studio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroStatus {
    /// Call `resume` again after this delay
    Waiting(Duration),
    Finished,
}

/// A macro in progress
#[derive(Debug, Clone)]
pub struct MacroRun {
    macro_id: String,
    actions: Vec<MacroAction>,
    cursor: usize,
}

impl MacroRun {
    pub fn new(definition: &Macro) -> Self {
        Self {
            macro_id: definition.id.clone(),
            actions: definition.actions.clone(),
            cursor: 0,
        }
    }

    pub fn macro_id(&self) -> &str {
        &self.macro_id
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    /// Run actions until the next WAIT or the end of the macro
    pub fn resume(&mut self, studio: &mut Studio) -> MacroStatus {
        while let Some(action) = self.actions.get(self.cursor) {
            self.cursor += 1;
            log::debug!("Macro '{}' step {}: {:?}", self.macro_id, self.cursor, action);

            match action {
                MacroAction::Wait(ms) => return MacroStatus::Waiting(Duration::from_millis(*ms)),
                MacroAction::SceneRecall(scene_id) => studio.set_pgm(scene_id),
                MacroAction::SourcePvw(source_id) => studio.set_pvw(source_id),
                MacroAction::Auto => studio.take(),
                MacroAction::Cut => studio.cut(),
                MacroAction::OverlayToggle(overlay_id) => {
                    if studio.graphics_mut().toggle_overlay(overlay_id).is_none() {
                        log::warn!("Macro '{}': unknown overlay '{}'", self.macro_id, overlay_id);
                    }
                }
                MacroAction::AudioMute(channel_id) => {
                    if !studio.audio_mut().set_muted(channel_id, true) {
                        log::warn!("Macro '{}': unknown audio channel '{}'", self.macro_id, channel_id);
                    }
                }
                MacroAction::AudioUnmute(channel_id) => {
                    if !studio.audio_mut().set_muted(channel_id, false) {
                        log::warn!("Macro '{}': unknown audio channel '{}'", self.macro_id, channel_id);
                    }
                }
            }
        }

        log::info!("Macro '{}' finished", self.macro_id);
        MacroStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_macros, MacroColor, OverlayLayer, OverlayType, TransitionType};
    use serde_json::json;

    fn find(id: &str) -> Macro {
        default_macros().into_iter().find(|m| m.id == id).unwrap()
    }

    #[test]
    fn test_intro_sequence_pauses_on_wait() {
        let mut studio = Studio::first_run();
        let mut overlay = OverlayLayer::new(OverlayType::LowerThird, 30, json!({ "name": "Host" }));
        overlay.id = "lower_third".to_string();
        overlay.visible = false;
        studio.graphics_mut().add_overlay(overlay);
        studio.set_pgm("scene_game");

        let mut run = MacroRun::new(&find("intro_seq"));

        assert_eq!(run.resume(&mut studio), MacroStatus::Waiting(Duration::from_millis(5000)));
        assert_eq!(studio.switcher_state().pgm_id, "scene_start");
        assert!(!run.is_finished());

        assert_eq!(run.resume(&mut studio), MacroStatus::Finished);
        assert_eq!(studio.switcher_state().pgm_id, "scene_talk");
        assert!(studio.graphics().state().overlays[0].visible);
        assert!(run.is_finished());
    }

    #[test]
    fn test_break_mutes_channels() {
        let mut studio = Studio::first_run();
        studio.set_pgm("scene_game");
        let mut run = MacroRun::new(&find("break"));

        assert_eq!(run.resume(&mut studio), MacroStatus::Finished);
        assert!(studio.audio().get("cam1").unwrap().muted);
        assert!(studio.audio().get("cam2").unwrap().muted);
        assert_eq!(studio.switcher_state().pgm_id, "scene_start");
        assert_eq!(studio.scenes().active_scene_id(), "scene_start");
    }

    #[test]
    fn test_replay_hit_cuts_with_cut_transition() {
        let mut studio = Studio::first_run();
        studio.set_transition_type(TransitionType::Cut);
        studio.set_pgm("cam1");
        let mut run = MacroRun::new(&find("replay_hit"));

        assert!(matches!(run.resume(&mut studio), MacroStatus::Waiting(_)));
        assert_eq!(studio.switcher_state().pgm_id, "cam3");
        assert_eq!(studio.switcher_state().pvw_id, "cam1");

        assert_eq!(run.resume(&mut studio), MacroStatus::Finished);
        assert_eq!(studio.switcher_state().pgm_id, "cam1");
    }

    #[test]
    fn test_unknown_targets_do_not_stop_the_macro() {
        let mut studio = Studio::first_run();
        let definition = Macro {
            id: "broken".to_string(),
            label: "BROKEN".to_string(),
            color: MacroColor::Purple,
            actions: vec![
                MacroAction::OverlayToggle("missing".to_string()),
                MacroAction::AudioMute("missing".to_string()),
                MacroAction::Cut,
            ],
        };
        let mut run = MacroRun::new(&definition);

        assert_eq!(run.resume(&mut studio), MacroStatus::Finished);
        assert_eq!(studio.switcher_state().pgm_id, "scene_talk");
        // resuming a finished run is harmless
        assert_eq!(run.resume(&mut studio), MacroStatus::Finished);
    }
}
