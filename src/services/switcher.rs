// Switcher Engine
// Owns the PGM/PVW state. Every operation is a whole-state update applied
// synchronously, mirrored into the scene registry cursors in the same step.

use std::sync::Arc;

use crate::models::{
    BroadcastScene, HardwareSwitcherState, SourceStatus, SwitcherState, TransitionType, VideoSource,
};
use crate::services::{emit_event, resolve_items, EventSink, ResolvedItem, SceneRegistry, SourceRegistry};

pub const SWITCHER_STATE_EVENT: &str = "switcher_state_changed";

/// Why a slot fell back to the safe slate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The id matched no scene and no source
    Unresolved,
    /// The source reported a failsafe condition (e.g. drone link loss)
    SourceFailsafe,
}

/// What a PGM or PVW slot renders
#[derive(Debug, Clone, PartialEq)]
pub enum Output<'a> {
    Scene {
        scene: &'a BroadcastScene,
        items: Vec<ResolvedItem<'a>>,
    },
    Source(&'a VideoSource),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOutput<'a> {
    /// The id held by the switcher
    pub requested_id: &'a str,
    pub output: Output<'a>,
    /// Set when the safe slate was substituted
    pub fallback: Option<FallbackReason>,
}

impl ResolvedOutput<'_> {
    /// Whether the slate is what will be rendered
    pub fn is_safe_slate(&self) -> bool {
        matches!(self.output, Output::Source(source) if source.is_safe_slate())
    }
}

/// Resolve an id against scenes, then sources, falling back to the safe slate
pub fn resolve_output<'a>(
    id: &'a str,
    sources: &'a SourceRegistry,
    scenes: &'a SceneRegistry,
) -> ResolvedOutput<'a> {
    if let Some(scene) = scenes.get(id) {
        return ResolvedOutput {
            requested_id: id,
            output: Output::Scene {
                scene,
                items: resolve_items(scene, sources),
            },
            fallback: None,
        };
    }

    let fallback = match sources.get(id) {
        Some(source) if source.status != SourceStatus::Failsafe => {
            return ResolvedOutput {
                requested_id: id,
                output: Output::Source(source),
                fallback: None,
            };
        }
        Some(_) => FallbackReason::SourceFailsafe,
        None => FallbackReason::Unresolved,
    };

    ResolvedOutput {
        requested_id: id,
        output: Output::Source(sources.safe_source()),
        fallback: Some(fallback),
    }
}

pub struct SwitcherEngine {
    state: SwitcherState,
    events: Arc<dyn EventSink>,
}

impl SwitcherEngine {
    pub fn new(pgm_id: &str, pvw_id: &str, events: Arc<dyn EventSink>) -> Self {
        Self {
            state: SwitcherState::new(pgm_id, pvw_id),
            events,
        }
    }

    /// Start from the scene registry's active and preview cursors
    pub fn from_scenes(scenes: &SceneRegistry, events: Arc<dyn EventSink>) -> Self {
        Self::new(scenes.active_scene_id(), scenes.preview_scene_id(), events)
    }

    pub fn state(&self) -> &SwitcherState {
        &self.state
    }

    fn publish(&self) {
        emit_event(self.events.as_ref(), SWITCHER_STATE_EVENT, &self.state);
    }

    fn swap_slots(&mut self, scenes: &mut SceneRegistry) {
        let state = &mut self.state;
        std::mem::swap(&mut state.pgm_id, &mut state.pvw_id);
        state.transitioning = false;
        state.transition_progress = 0;
        scenes.set_active_scene_id(&state.pgm_id);
        scenes.set_preview_scene_id(&state.pvw_id);
    }

    /// Instant swap of PGM and PVW. Equal slots make this a no-op.
    pub fn cut(&mut self, scenes: &mut SceneRegistry) {
        if self.state.pgm_id == self.state.pvw_id {
            log::debug!("CUT with PGM and PVW both on '{}'", self.state.pgm_id);
        }
        self.swap_slots(scenes);
        log::info!("CUT: PGM '{}', PVW '{}'", self.state.pgm_id, self.state.pvw_id);
        self.publish();
    }

    /// Stage an id on PVW; PGM is untouched
    pub fn set_pvw(&mut self, id: &str, scenes: &mut SceneRegistry) {
        self.state.pvw_id = id.to_string();
        scenes.set_preview_scene_id(id);
        log::info!("PVW set to '{}'", id);
        self.publish();
    }

    /// Put an id straight on air, bypassing preview
    pub fn set_pgm(&mut self, id: &str, scenes: &mut SceneRegistry) {
        self.state.pgm_id = id.to_string();
        scenes.set_active_scene_id(id);
        log::info!("PGM set to '{}'", id);
        self.publish();
    }

    /// Flip the on-air flag. Starts or stops no I/O.
    pub fn toggle_live(&mut self) {
        self.state.is_live = !self.state.is_live;
        log::info!("Live: {}", if self.state.is_live { "ON AIR" } else { "OFF" });
        self.publish();
    }

    pub fn toggle_recording(&mut self) {
        self.state.is_recording = !self.state.is_recording;
        log::info!("Recording flag: {}", self.state.is_recording);
        self.publish();
    }

    pub fn toggle_dsk1(&mut self) {
        self.state.keyer.dsk1_active = !self.state.keyer.dsk1_active;
        self.publish();
    }

    pub fn toggle_dsk2(&mut self) {
        self.state.keyer.dsk2_active = !self.state.keyer.dsk2_active;
        self.publish();
    }

    pub fn toggle_chroma(&mut self) {
        self.state.keyer.chroma_active = !self.state.keyer.chroma_active;
        self.publish();
    }

    pub fn set_transition_type(&mut self, transition_type: TransitionType) {
        self.state.transition_type = transition_type;
        self.publish();
    }

    /// AUTO: run the configured transition. CUT swaps immediately;
    /// other types start a transition driven by `advance_transition`.
    pub fn take(&mut self, scenes: &mut SceneRegistry) {
        if self.state.transition_type == TransitionType::Cut {
            self.cut(scenes);
            return;
        }
        if self.state.transitioning {
            log::debug!("TAKE ignored, transition already running");
            return;
        }
        self.state.transitioning = true;
        self.state.transition_progress = 0;
        log::info!(
            "TAKE ({:?}): '{}' -> '{}'",
            self.state.transition_type, self.state.pvw_id, self.state.pgm_id
        );
        self.publish();
    }

    /// Move a running transition forward; completes with a swap at 100
    pub fn advance_transition(&mut self, delta: u8, scenes: &mut SceneRegistry) {
        if !self.state.transitioning {
            return;
        }
        let progress = self.state.transition_progress.saturating_add(delta);
        self.set_transition_progress(progress, scenes);
    }

    /// Absolute transition position (e.g. from a T-bar), clamped to 0-100.
    /// 100 completes the transition, 0 abandons it.
    pub fn set_transition_progress(&mut self, progress: u8, scenes: &mut SceneRegistry) {
        match progress.min(100) {
            100 => {
                self.swap_slots(scenes);
                log::info!(
                    "{:?} complete: PGM '{}', PVW '{}'",
                    self.state.transition_type, self.state.pgm_id, self.state.pvw_id
                );
            }
            0 => {
                self.state.transitioning = false;
                self.state.transition_progress = 0;
            }
            p => {
                self.state.transitioning = true;
                self.state.transition_progress = p;
            }
        }
        self.publish();
    }

    /// Store the hardware mirror. PGM/PVW are never touched.
    pub fn sync_hardware(&mut self, snapshot: HardwareSwitcherState) {
        if self.state.hardware_sync != snapshot {
            self.state.hardware_sync = snapshot;
            self.publish();
        }
    }

    pub fn resolve_program<'a>(&'a self, sources: &'a SourceRegistry, scenes: &'a SceneRegistry) -> ResolvedOutput<'a> {
        let resolved = resolve_output(&self.state.pgm_id, sources, scenes);
        if let Some(reason) = resolved.fallback {
            log::warn!("PGM '{}' unavailable ({:?}), showing safe slate", self.state.pgm_id, reason);
        }
        resolved
    }

    pub fn resolve_preview<'a>(&'a self, sources: &'a SourceRegistry, scenes: &'a SceneRegistry) -> ResolvedOutput<'a> {
        resolve_output(&self.state.pvw_id, sources, scenes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SourceUpdate, SyncStatus, SAFE_SOURCE_ID};
    use crate::services::events::testing::RecordingSink;
    use crate::services::NoopEventSink;

    fn engine(pgm: &str, pvw: &str) -> (SwitcherEngine, SceneRegistry) {
        let scenes = SceneRegistry::with_scenes(Vec::new(), pgm, pvw);
        (SwitcherEngine::from_scenes(&scenes, Arc::new(NoopEventSink)), scenes)
    }

    #[test]
    fn test_cut_swaps_and_double_cut_restores() {
        let (mut switcher, mut scenes) = engine("A", "B");
        let original = switcher.state().clone();

        switcher.cut(&mut scenes);
        assert_eq!(switcher.state().pgm_id, "B");
        assert_eq!(switcher.state().pvw_id, "A");
        assert_eq!(scenes.active_scene_id(), "B");
        assert_eq!(scenes.preview_scene_id(), "A");

        switcher.cut(&mut scenes);
        assert_eq!(switcher.state(), &original);
    }

    #[test]
    fn test_cut_never_aliases_distinct_slots() {
        for (a, b) in [("cam1", "cam2"), ("scene_start", "scene_talk"), ("x", "")] {
            let (mut switcher, mut scenes) = engine(a, b);
            switcher.cut(&mut scenes);
            assert_ne!(switcher.state().pgm_id, switcher.state().pvw_id);
        }
    }

    #[test]
    fn test_set_pvw_leaves_pgm_alone() {
        let (mut switcher, mut scenes) = engine("cam1", "cam2");
        for id in ["cam3", "cam1", "", "unknown"] {
            let before = switcher.state().pgm_id.clone();
            switcher.set_pvw(id, &mut scenes);
            assert_eq!(switcher.state().pgm_id, before);
            assert_eq!(switcher.state().pvw_id, id);
            assert_eq!(scenes.preview_scene_id(), id);
        }
    }

    #[test]
    fn test_set_pgm_mirrors_active_cursor() {
        let (mut switcher, mut scenes) = engine("cam1", "cam2");
        switcher.set_pgm("cam3", &mut scenes);
        assert_eq!(switcher.state().pgm_id, "cam3");
        assert_eq!(switcher.state().pvw_id, "cam2");
        assert_eq!(scenes.active_scene_id(), "cam3");
    }

    #[test]
    fn test_equal_slots_cut_is_noop() {
        let (mut switcher, mut scenes) = engine("cam1", "cam2");
        switcher.set_pvw("cam1", &mut scenes);
        assert_eq!(switcher.state().pgm_id, "cam1");
        assert_eq!(switcher.state().pvw_id, "cam1");

        switcher.cut(&mut scenes);
        assert_eq!(switcher.state().pgm_id, "cam1");
        assert_eq!(switcher.state().pvw_id, "cam1");
    }

    #[test]
    fn test_toggle_live_only_flips_flag() {
        let (mut switcher, _scenes) = engine("cam1", "cam2");
        switcher.toggle_live();
        assert!(switcher.state().is_live);
        assert_eq!(switcher.state().pgm_id, "cam1");
        switcher.toggle_live();
        assert!(!switcher.state().is_live);
    }

    #[test]
    fn test_unknown_pgm_resolves_to_safe_slate() {
        let sources = SourceRegistry::new();
        let (mut switcher, mut scenes) = engine("cam1", "cam2");
        switcher.set_pgm("nowhere", &mut scenes);

        let program = switcher.resolve_program(&sources, &scenes);

        assert!(program.is_safe_slate());
        assert_eq!(program.fallback, Some(FallbackReason::Unresolved));
        match program.output {
            Output::Source(source) => {
                assert_eq!(source.id, SAFE_SOURCE_ID);
                assert_eq!(source.status, SourceStatus::Ok);
            }
            other => panic!("expected safe slate, got {other:?}"),
        }
    }

    #[test]
    fn test_failsafe_source_resolves_to_safe_slate() {
        let mut sources = SourceRegistry::new();
        sources
            .update_source_metadata("cam3", SourceUpdate::status(SourceStatus::Failsafe))
            .unwrap();
        let (switcher, scenes) = engine("cam3", "cam1");

        let program = switcher.resolve_program(&sources, &scenes);
        assert!(program.is_safe_slate());
        assert_eq!(program.fallback, Some(FallbackReason::SourceFailsafe));

        let preview = switcher.resolve_preview(&sources, &scenes);
        assert!(matches!(preview.output, Output::Source(s) if s.id == "cam1"));
        assert_eq!(preview.fallback, None);
    }

    #[test]
    fn test_scene_ids_resolve_before_sources() {
        let sources = SourceRegistry::new();
        let scenes = SceneRegistry::new();
        let switcher = SwitcherEngine::from_scenes(&scenes, Arc::new(NoopEventSink));

        let program = switcher.resolve_program(&sources, &scenes);
        match &program.output {
            Output::Scene { scene, items } => {
                assert_eq!(scene.id, "scene_start");
                assert_eq!(items.len(), 1);
            }
            other => panic!("expected scene, got {other:?}"),
        }
        assert!(!program.is_safe_slate());
    }

    #[test]
    fn test_take_with_cut_type_swaps_immediately() {
        let (mut switcher, mut scenes) = engine("A", "B");
        switcher.set_transition_type(TransitionType::Cut);
        switcher.take(&mut scenes);
        assert_eq!(switcher.state().pgm_id, "B");
        assert!(!switcher.state().transitioning);
    }

    #[test]
    fn test_mix_transition_completes_with_swap() {
        let (mut switcher, mut scenes) = engine("A", "B");
        switcher.take(&mut scenes);
        assert!(switcher.state().transitioning);

        switcher.advance_transition(60, &mut scenes);
        assert_eq!(switcher.state().transition_progress, 60);
        assert_eq!(switcher.state().pgm_id, "A");

        switcher.advance_transition(60, &mut scenes);
        assert_eq!(switcher.state().pgm_id, "B");
        assert_eq!(switcher.state().pvw_id, "A");
        assert!(!switcher.state().transitioning);
        assert_eq!(switcher.state().transition_progress, 0);

        // advancing while idle does nothing
        switcher.advance_transition(100, &mut scenes);
        assert_eq!(switcher.state().pgm_id, "B");
    }

    #[test]
    fn test_transition_progress_zero_abandons() {
        let (mut switcher, mut scenes) = engine("A", "B");
        switcher.set_transition_progress(40, &mut scenes);
        assert!(switcher.state().transitioning);
        switcher.set_transition_progress(0, &mut scenes);
        assert!(!switcher.state().transitioning);
        assert_eq!(switcher.state().pgm_id, "A");
    }

    #[test]
    fn test_sync_hardware_does_not_move_slots() {
        let (mut switcher, _scenes) = engine("A", "B");
        let snapshot = HardwareSwitcherState {
            connected: true,
            sync_status: SyncStatus::Synced,
            fader_position: 100,
            ..Default::default()
        };
        switcher.sync_hardware(snapshot.clone());
        assert_eq!(switcher.state().hardware_sync, snapshot);
        assert_eq!(switcher.state().pgm_id, "A");
        assert_eq!(switcher.state().pvw_id, "B");
    }

    #[test]
    fn test_every_operation_publishes_state() {
        let sink = Arc::new(RecordingSink::default());
        let mut scenes = SceneRegistry::new();
        let mut switcher = SwitcherEngine::from_scenes(&scenes, sink.clone());

        switcher.cut(&mut scenes);
        switcher.toggle_dsk1();

        assert_eq!(sink.names(), vec![SWITCHER_STATE_EVENT, SWITCHER_STATE_EVENT]);
        let (_, payload) = sink.last().unwrap();
        assert_eq!(payload["pgmId"], "scene_talk");
        assert_eq!(payload["keyer"]["dsk1Active"], true);
    }
}
