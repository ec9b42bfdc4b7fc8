use std::{
    env,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use tokio::time::{interval, Instant};

use arcls_switcher::models::StudioSettings;
use arcls_switcher::services::{
    load_startup, save_config, AppConfig, FileStore, LogEventSink, MacroStatus, Output, SettingsManager, Startup,
    Studio,
};

// ============================================================================
// Constants
// ============================================================================

/// Render tick used to animate transitions
const FRAME_INTERVAL: Duration = Duration::from_millis(40);
/// Transition progress per frame; a MIX takes one second
const PROGRESS_PER_FRAME: u8 = 4;

// ============================================================================
// Logging
// ============================================================================

struct StudioLogger {
    file: Mutex<std::fs::File>,
}

impl StudioLogger {
    fn new(log_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let log_path = log_dir.join("arcls-switcher.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl Log for StudioLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now();
        let date = timestamp.format("%Y-%m-%d");
        let time = timestamp.format("%H:%M:%S");
        let line = format!("[{date}][{time}][{}][{}] {}", record.target(), record.level(), record.args());

        if let Ok(mut file) = self.file.try_lock() {
            let _ = writeln!(file, "{line}");
        }
        eprintln!("{line}");
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logger(log_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let logger = StudioLogger::new(log_dir)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

// ============================================================================
// Automation
// ============================================================================

/// Animate any running transition until `duration` has passed and the
/// transition has settled
async fn run_frames(studio: &mut Studio, duration: Duration) {
    let deadline = Instant::now() + duration;
    let mut ticker = interval(FRAME_INTERVAL);
    loop {
        ticker.tick().await;
        if studio.switcher_state().transitioning {
            studio.advance_transition(PROGRESS_PER_FRAME);
        } else if Instant::now() >= deadline {
            break;
        }
    }
}

async fn run_macro(studio: &mut Studio, macro_id: &str) {
    let Some(mut run) = studio.start_macro(macro_id) else {
        return;
    };
    log::info!("Running macro '{}'", macro_id);
    loop {
        match run.resume(studio) {
            MacroStatus::Waiting(delay) => run_frames(studio, delay).await,
            MacroStatus::Finished => {
                run_frames(studio, Duration::ZERO).await;
                break;
            }
        }
    }
}

// ============================================================================
// Startup
// ============================================================================

fn describe(output: &Output<'_>) -> String {
    match output {
        Output::Scene { scene, items } => format!("scene '{}' ({} layers)", scene.name, items.len()),
        Output::Source(source) => format!("source '{}'", source.label),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = PathBuf::from(env::var("ARCLS_DATA_DIR").unwrap_or_else(|_| "arcls-data".to_string()));
    std::fs::create_dir_all(&data_dir)?;
    init_logger(&data_dir)?;

    let settings_manager = SettingsManager::new(data_dir.clone());
    let settings = settings_manager.load().unwrap_or_else(|e| {
        log::warn!("{e}; using default settings");
        StudioSettings::default()
    });
    log::set_max_level(settings.log_level_filter());

    let store = FileStore::new(data_dir.join("config"));
    let config = match load_startup(&store) {
        Startup::Resume(config) => config,
        Startup::FirstRun => {
            log::info!("Setup required, seeding demo configuration");
            let config = AppConfig::default();
            save_config(&store, &config)?;
            config
        }
    };

    let mut studio = Studio::from_config(config, &settings, Arc::new(LogEventSink));
    log::info!(
        "Studio ready: {} sources, {} scenes, transition {:?}",
        studio.sources().len(),
        studio.scenes().scenes().len(),
        studio.switcher_state().transition_type
    );

    if let Ok(macro_id) = env::var("ARCLS_STARTUP_MACRO") {
        run_macro(&mut studio, macro_id.trim()).await;
    }

    let state = studio.switcher_state();
    log::info!("PGM '{}': {}", state.pgm_id, describe(&studio.program_output().output));
    log::info!("PVW '{}': {}", state.pvw_id, describe(&studio.preview_output().output));
    for layer in studio.overlay_layers() {
        log::info!("Overlay '{}' ({:?}) z={}", layer.id, layer.overlay_type, layer.z_index);
    }

    log::logger().flush();
    Ok(())
}
