// Studio
// Composition root: owns every engine and routes operator and director
// input through the switcher so the scene cursors stay in step.

use std::sync::Arc;

use crate::models::{
    default_macros, default_scenes, DirectorCommand, GfxLayer, Macro, OverlayLayer, RtmpConfig,
    StudioSettings, SwitcherState, TransitionType,
};
use crate::services::{
    refresh_sources, AppConfig, AudioEngine, CommerceEngine, DeviceScanner, EventSink,
    GraphicsEngine, HardwareSwitcherEngine, MacroRun, NoopEventSink, OverlayCompositor, ResolvedOutput,
    SceneRegistry, SourceRegistry, SwitcherEngine,
};

pub struct Studio {
    sources: SourceRegistry,
    scenes: SceneRegistry,
    switcher: SwitcherEngine,
    hardware: HardwareSwitcherEngine,
    commerce: CommerceEngine,
    graphics: GraphicsEngine,
    audio: AudioEngine,
    rtmp: Vec<RtmpConfig>,
    macros: Vec<Macro>,
}

impl Studio {
    /// Build the studio from a saved (or freshly set up) configuration
    pub fn from_config(config: AppConfig, settings: &StudioSettings, events: Arc<dyn EventSink>) -> Self {
        let scenes = SceneRegistry::with_scenes(
            default_scenes(),
            &settings.start_scene_id,
            &settings.preview_scene_id,
        );
        let mut switcher = SwitcherEngine::from_scenes(&scenes, events);
        if settings.default_transition != TransitionType::default() {
            switcher.set_transition_type(settings.default_transition);
        }

        Self {
            sources: SourceRegistry::from_sources(config.sources),
            scenes,
            switcher,
            hardware: HardwareSwitcherEngine::new(&settings.hardware_model),
            commerce: CommerceEngine::default(),
            graphics: GraphicsEngine::default(),
            audio: AudioEngine::new(config.audio),
            rtmp: config.rtmp,
            macros: default_macros(),
        }
    }

    /// Demo configuration, default settings, events dropped
    pub fn first_run() -> Self {
        Self::from_config(AppConfig::default(), &StudioSettings::default(), Arc::new(NoopEventSink))
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceRegistry {
        &mut self.sources
    }

    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    /// Scene editing. Cursor changes should go through the switcher operations.
    pub fn scenes_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scenes
    }

    pub fn switcher_state(&self) -> &SwitcherState {
        self.switcher.state()
    }

    pub fn hardware(&self) -> &HardwareSwitcherEngine {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut HardwareSwitcherEngine {
        &mut self.hardware
    }

    pub fn commerce(&self) -> &CommerceEngine {
        &self.commerce
    }

    pub fn commerce_mut(&mut self) -> &mut CommerceEngine {
        &mut self.commerce
    }

    pub fn graphics(&self) -> &GraphicsEngine {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut GraphicsEngine {
        &mut self.graphics
    }

    pub fn audio(&self) -> &AudioEngine {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioEngine {
        &mut self.audio
    }

    pub fn rtmp(&self) -> &[RtmpConfig] {
        &self.rtmp
    }

    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    /// Snapshot of what setup would persist for the current studio
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            sources: self.sources.sources().to_vec(),
            audio: self.audio.channels().to_vec(),
            rtmp: self.rtmp.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Switcher operations
    // ------------------------------------------------------------------

    pub fn cut(&mut self) {
        self.switcher.cut(&mut self.scenes);
    }

    pub fn set_pvw(&mut self, id: &str) {
        self.switcher.set_pvw(id, &mut self.scenes);
    }

    pub fn set_pgm(&mut self, id: &str) {
        self.switcher.set_pgm(id, &mut self.scenes);
    }

    pub fn take(&mut self) {
        self.switcher.take(&mut self.scenes);
    }

    pub fn advance_transition(&mut self, delta: u8) {
        self.switcher.advance_transition(delta, &mut self.scenes);
    }

    pub fn set_transition_progress(&mut self, progress: u8) {
        self.switcher.set_transition_progress(progress, &mut self.scenes);
    }

    pub fn set_transition_type(&mut self, transition_type: TransitionType) {
        self.switcher.set_transition_type(transition_type);
    }

    pub fn toggle_live(&mut self) {
        self.switcher.toggle_live();
    }

    pub fn toggle_recording(&mut self) {
        self.switcher.toggle_recording();
    }

    pub fn toggle_dsk1(&mut self) {
        self.switcher.toggle_dsk1();
    }

    pub fn toggle_dsk2(&mut self) {
        self.switcher.toggle_dsk2();
    }

    pub fn toggle_chroma(&mut self) {
        self.switcher.toggle_chroma();
    }

    /// Copy the hardware mirror into the switcher state
    pub fn sync_hardware(&mut self) {
        self.switcher.sync_hardware(self.hardware.snapshot());
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn program_output(&self) -> ResolvedOutput<'_> {
        self.switcher.resolve_program(&self.sources, &self.scenes)
    }

    pub fn preview_output(&self) -> ResolvedOutput<'_> {
        self.switcher.resolve_preview(&self.sources, &self.scenes)
    }

    /// On air with the safe slate on PGM, whether selected or substituted
    pub fn failsafe_active(&self) -> bool {
        self.switcher.state().is_live && self.program_output().is_safe_slate()
    }

    pub fn overlay_layers(&self) -> Vec<OverlayLayer> {
        OverlayCompositor::compose(
            &self.switcher.state().keyer,
            self.commerce.state(),
            self.graphics.state(),
        )
    }

    // ------------------------------------------------------------------
    // Automation
    // ------------------------------------------------------------------

    /// Rescan capture devices and merge them into the source registry
    pub fn refresh_devices(&mut self, scanner: &dyn DeviceScanner) -> Vec<String> {
        refresh_sources(scanner, &mut self.sources)
    }

    /// Start a macro; drive it with `MacroRun::resume`
    pub fn start_macro(&self, macro_id: &str) -> Option<MacroRun> {
        let found = self.macros.iter().find(|m| m.id == macro_id);
        if found.is_none() {
            log::warn!("Unknown macro '{}'", macro_id);
        }
        found.map(MacroRun::new)
    }

    pub fn execute_command(&mut self, command: DirectorCommand) {
        log::info!("Director command: {:?}", command);
        match command {
            DirectorCommand::Cut { target: Some(target) } => self.set_pgm(&target),
            DirectorCommand::Cut { target: None } => self.cut(),
            DirectorCommand::Pvw { target } => self.set_pvw(&target),
            DirectorCommand::Replay { clip } => {
                log::info!("Replay requested: {}", clip.as_deref().unwrap_or("last clip"));
            }
            DirectorCommand::Gfx { layer: GfxLayer::Scoreboard } => self.toggle_dsk1(),
            DirectorCommand::Gfx { layer: GfxLayer::Chat } => self.toggle_dsk2(),
            DirectorCommand::Gfx { layer: GfxLayer::Commerce } => {
                self.commerce.set_active_product(None);
            }
            DirectorCommand::CommercePush { product_id } => {
                self.commerce.set_active_product(Some(&product_id));
            }
        }
    }
}
