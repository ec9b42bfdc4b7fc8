// Source Model
// Represents capturable video inputs and the reserved safe slate

use serde::{Deserialize, Serialize};

/// Identifier of the reserved broadcast-safe slate
pub const SAFE_SOURCE_ID: &str = "safe_source";

const SAFE_SLATE_PREVIEW: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAxOTIwIDEwODAiPjxyZWN0IHdpZHRoPSIxOTIwIiBoZWlnaHQ9IjEwODAiIGZpbGw9IiMxMTEiLz48dGV4dCB4PSI1MCUiIHk9IjUwJSIgZG9taW5hbnQtYmFzZWxpbmU9Im1pZGRsZSIgdGV4dC1hbmNob3I9Im1pZGRsZSIgZmlsbD0iIzk5OSIgZm9udC1mYW1pbHk9Im1vbm9zcGFjZSIgZm9udC1zaXplPSI1MCI+U0FGRSBTT1VSQ0U8L3RleHQ+PC9zdmc+";

/// Kind of input feeding a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    Slate,
    Camera,
    Rtsp,
    Ndi,
    Screen,
    Media,
    Webrtc,
    IpStream,
    Drone,
}

/// Signal health reported for a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceStatus {
    #[default]
    Ok,
    NoSignal,
    Connecting,
    Validating,
    Error,
    Failsafe,
}

impl SourceStatus {
    /// Whether a source in this state can be put on screen
    pub fn has_signal(self) -> bool {
        matches!(self, SourceStatus::Ok | SourceStatus::Connecting | SourceStatus::Validating)
    }
}

/// Camera orientation on devices that expose one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    User,
    Environment,
}

/// Probed capabilities of a capture device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCapabilities {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f32,
    pub aspect_ratio: f32,
    pub ptz: bool,
    pub audio: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_mode: Option<FacingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone: Option<bool>,
}

/// Opaque handle to a live media stream owned by the capture layer.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub u64);

/// VideoSource - one capturable input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    /// Unique identifier, immutable once created
    pub id: String,
    /// Short label (e.g. "CAM 1")
    pub label: String,
    /// Operator-facing name
    #[serde(default)]
    pub display_name: String,
    /// Optional grouping hint ("Studio", "Remote", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_tag: Option<String>,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub status: SourceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_url: Option<String>,
    /// Platform device handle; at most one source per device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<SourceCapabilities>,
    #[serde(skip)]
    pub stream: Option<StreamHandle>,
}

impl VideoSource {
    /// Create a source with the given id, label and type; status OK, active
    pub fn new(id: &str, label: &str, source_type: SourceType) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            display_name: label.to_string(),
            origin_tag: None,
            source_type,
            active: true,
            status: SourceStatus::Ok,
            preview_url: None,
            native_url: None,
            device_id: None,
            capabilities: None,
            stream: None,
        }
    }

    /// The reserved always-available slate
    pub fn safe_slate() -> Self {
        Self {
            display_name: "SAFE SLATE".to_string(),
            origin_tag: Some("SYSTEM".to_string()),
            preview_url: Some(SAFE_SLATE_PREVIEW.to_string()),
            ..Self::new(SAFE_SOURCE_ID, "SAFE", SourceType::Slate)
        }
    }

    pub fn is_safe_slate(&self) -> bool {
        self.id == SAFE_SOURCE_ID
    }

    /// Apply a partial update. The identifier is never touched.
    pub fn apply(&mut self, update: SourceUpdate) {
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(origin_tag) = update.origin_tag {
            self.origin_tag = origin_tag;
        }
        if let Some(source_type) = update.source_type {
            self.source_type = source_type;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(preview_url) = update.preview_url {
            self.preview_url = preview_url;
        }
        if let Some(native_url) = update.native_url {
            self.native_url = native_url;
        }
        if let Some(device_id) = update.device_id {
            self.device_id = device_id;
        }
        if let Some(capabilities) = update.capabilities {
            self.capabilities = capabilities;
        }
        if let Some(stream) = update.stream {
            self.stream = stream;
        }
    }
}

/// Partial metadata update for a source.
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct SourceUpdate {
    pub label: Option<String>,
    pub display_name: Option<String>,
    pub origin_tag: Option<Option<String>>,
    pub source_type: Option<SourceType>,
    pub active: Option<bool>,
    pub status: Option<SourceStatus>,
    pub preview_url: Option<Option<String>>,
    pub native_url: Option<Option<String>>,
    pub device_id: Option<Option<String>>,
    pub capabilities: Option<Option<SourceCapabilities>>,
    pub stream: Option<Option<StreamHandle>>,
}

impl SourceUpdate {
    pub fn status(status: SourceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Sources available before any configuration exists
pub fn default_sources() -> Vec<VideoSource> {
    let camera = |id: &str, label: &str, name: &str, origin: &str, n: u32| VideoSource {
        display_name: name.to_string(),
        origin_tag: Some(origin.to_string()),
        preview_url: Some(format!("https://picsum.photos/600/338?random={n}")),
        ..VideoSource::new(id, label, SourceType::Camera)
    };

    vec![
        VideoSource::safe_slate(),
        camera("cam1", "CAM 1", "Host Main", "Studio", 1),
        camera("cam2", "CAM 2", "Wide Shot", "Studio", 2),
        camera("cam3", "CAM 3", "Guest Remote", "Remote", 3),
        VideoSource {
            display_name: "Intro Loop".to_string(),
            origin_tag: Some("Disk".to_string()),
            preview_url: Some("https://picsum.photos/600/338?random=4".to_string()),
            ..VideoSource::new("media1", "MEDIA", SourceType::Media)
        },
    ]
}
