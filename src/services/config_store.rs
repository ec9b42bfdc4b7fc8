// Config Store
// Persisted studio configuration: three JSON values in a key-value store.
// Loading is all-or-nothing; anything short of three valid keys resets to
// first-run setup.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{default_audio_channels, default_sources, AudioChannel, RtmpConfig, VideoSource};

pub const SOURCES_KEY: &str = "arcls_sources";
pub const AUDIO_KEY: &str = "arcls_audio";
pub const RTMP_KEY: &str = "arcls_rtmp";

const CONFIG_KEYS: [&str; 3] = [SOURCES_KEY, AUDIO_KEY, RTMP_KEY];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Storage error for '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },
    #[error("Failed to parse '{key}': {source}")]
    Parse {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("Store lock poisoned while accessing '{key}'")]
    Poisoned { key: String },
}

/// String key-value storage holding JSON-encoded values
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
    fn remove(&self, key: &str) -> Result<(), ConfigError>;
}

/// One `<key>.json` file per key inside a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(self.path_for(key), value))
            .map_err(|source| ConfigError::Io { key: key.to_string(), source })
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ConfigError::Io { key: key.to_string(), source }),
        }
    }
}

/// In-process store, used by tests and embedders without a disk
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.values
            .read()
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn poisoned(key: &str) -> ConfigError {
    ConfigError::Poisoned { key: key.to_string() }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let values = self.values.read().map_err(|_| poisoned(key))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.write().map_err(|_| poisoned(key))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        let mut values = self.values.write().map_err(|_| poisoned(key))?;
        values.remove(key);
        Ok(())
    }
}

/// Configuration produced by first-run setup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub sources: Vec<VideoSource>,
    pub audio: Vec<AudioChannel>,
    pub rtmp: Vec<RtmpConfig>,
}

impl Default for AppConfig {
    /// Demo sources and audio channels with no stream targets
    fn default() -> Self {
        Self {
            sources: default_sources(),
            audio: default_audio_channels(),
            rtmp: Vec::new(),
        }
    }
}

/// Where startup goes after looking at the store
#[derive(Debug, Clone, PartialEq)]
pub enum Startup {
    /// All three keys were present and valid
    Resume(AppConfig),
    /// Setup has to run; the store has been cleared
    FirstRun,
}

fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, ConfigError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| ConfigError::Parse { key: key.to_string(), source })
}

fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), ConfigError> {
    let raw = serde_json::to_string(value)
        .map_err(|source| ConfigError::Serialize { key: key.to_string(), source })?;
    store.set(key, &raw)
}

fn read_config(store: &dyn KeyValueStore) -> Result<Option<AppConfig>, ConfigError> {
    let sources: Option<Vec<VideoSource>> = read_json(store, SOURCES_KEY)?;
    let audio: Option<Vec<AudioChannel>> = read_json(store, AUDIO_KEY)?;
    let rtmp: Option<Vec<RtmpConfig>> = read_json(store, RTMP_KEY)?;

    Ok(match (sources, audio, rtmp) {
        (Some(sources), Some(audio), Some(rtmp)) => Some(AppConfig { sources, audio, rtmp }),
        _ => None,
    })
}

/// Remove all three configuration keys. Failures are logged, not returned.
pub fn clear_config(store: &dyn KeyValueStore) {
    for key in CONFIG_KEYS {
        if let Err(e) = store.remove(key) {
            log::warn!("Failed to clear '{}': {}", key, e);
        }
    }
}

/// Resume with the saved configuration, or reset to first-run setup
pub fn load_startup(store: &dyn KeyValueStore) -> Startup {
    match read_config(store) {
        Ok(Some(config)) => {
            log::info!(
                "Loaded configuration: {} sources, {} audio channels, {} RTMP targets",
                config.sources.len(),
                config.audio.len(),
                config.rtmp.len()
            );
            Startup::Resume(config)
        }
        Ok(None) => {
            log::info!("No complete configuration found, starting setup");
            clear_config(store);
            Startup::FirstRun
        }
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            clear_config(store);
            Startup::FirstRun
        }
    }
}

/// Persist the result of setup
pub fn save_config(store: &dyn KeyValueStore, config: &AppConfig) -> Result<(), ConfigError> {
    write_json(store, SOURCES_KEY, &config.sources)?;
    write_json(store, AUDIO_KEY, &config.audio)?;
    write_json(store, RTMP_KEY, &config.rtmp)?;
    log::info!("Configuration saved");
    Ok(())
}
