// Source Registry
// Flat list of configured video inputs, keyed by id.
// The safe slate is always present and cannot be removed or altered.

use crate::models::{default_sources, SourceStatus, SourceType, SourceUpdate, VideoSource, SAFE_SOURCE_ID};
use crate::services::VideoDevice;

/// Errors returned by registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Source '{0}' is protected")]
    ProtectedSource(String),
}

/// What `add_source` did with the new entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same id existed and was overwritten in place
    Replaced,
    /// The device handle was bound to another source, which was dropped
    DeviceReassigned { previous_id: String },
}

#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<VideoSource>,
}

impl SourceRegistry {
    /// Registry with the built-in default inputs
    pub fn new() -> Self {
        Self::from_sources(default_sources())
    }

    /// Build from a persisted list. The safe slate is prepended when missing
    /// and any persisted copy of it is replaced by the built-in one.
    pub fn from_sources(sources: Vec<VideoSource>) -> Self {
        let mut registry = Self {
            sources: vec![VideoSource::safe_slate()],
        };
        for source in sources {
            if source.is_safe_slate() {
                continue;
            }
            registry.insert(source);
        }
        registry
    }

    pub fn sources(&self) -> &[VideoSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Never true: the safe slate is always registered
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, id: &str) -> Option<&VideoSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_device(&self, device_id: &str) -> Option<&VideoSource> {
        self.sources
            .iter()
            .find(|s| s.device_id.as_deref() == Some(device_id))
    }

    /// The reserved slate
    pub fn safe_source(&self) -> &VideoSource {
        // from_sources always seeds index 0 and nothing can remove it
        &self.sources[0]
    }

    /// Append a source. Same id overwrites in place; a device handle already
    /// bound to another source moves to the new one.
    pub fn add_source(&mut self, source: VideoSource) -> Result<AddOutcome, RegistryError> {
        if source.is_safe_slate() {
            log::warn!("Refusing to overwrite the safe slate");
            return Err(RegistryError::ProtectedSource(source.id));
        }
        let id = source.id.clone();
        let outcome = self.insert(source);
        log::info!("Source '{}' registered ({:?})", id, outcome);
        Ok(outcome)
    }

    fn insert(&mut self, source: VideoSource) -> AddOutcome {
        let mut outcome = AddOutcome::Added;

        if let Some(device_id) = source.device_id.as_deref() {
            if let Some(pos) = self
                .sources
                .iter()
                .position(|s| s.id != source.id && s.device_id.as_deref() == Some(device_id))
            {
                let previous = self.sources.remove(pos);
                log::warn!(
                    "Device '{}' moved from source '{}' to '{}'",
                    device_id, previous.id, source.id
                );
                outcome = AddOutcome::DeviceReassigned { previous_id: previous.id };
            }
        }

        match self.sources.iter_mut().find(|s| s.id == source.id) {
            Some(existing) => {
                *existing = source;
                if outcome == AddOutcome::Added {
                    outcome = AddOutcome::Replaced;
                }
            }
            None => self.sources.push(source),
        }

        outcome
    }

    /// Remove by id. Unknown ids are a no-op; the safe slate is rejected.
    pub fn remove_source(&mut self, id: &str) -> Result<Option<VideoSource>, RegistryError> {
        if id == SAFE_SOURCE_ID {
            log::warn!("Attempt to remove protected source '{}' ignored", id);
            return Err(RegistryError::ProtectedSource(id.to_string()));
        }
        let removed = self
            .sources
            .iter()
            .position(|s| s.id == id)
            .map(|pos| self.sources.remove(pos));
        if removed.is_some() {
            log::info!("Source '{}' removed", id);
        }
        Ok(removed)
    }

    /// Merge fields into an existing source. Returns whether a source was updated.
    /// Unknown ids are a no-op.
    pub fn update_source_metadata(
        &mut self,
        id: &str,
        mut update: SourceUpdate,
    ) -> Result<bool, RegistryError> {
        if id == SAFE_SOURCE_ID {
            log::warn!("Attempt to modify protected source '{}' ignored", id);
            return Err(RegistryError::ProtectedSource(id.to_string()));
        }

        if let Some(Some(device_id)) = &update.device_id {
            if let Some(owner) = self.find_by_device(device_id).filter(|s| s.id != id) {
                log::warn!(
                    "Device '{}' already belongs to source '{}', ignoring device change for '{}'",
                    device_id, owner.id, id
                );
                update.device_id = None;
            }
        }

        match self.sources.iter_mut().find(|s| s.id == id) {
            Some(source) => {
                source.apply(update);
                log::debug!("Source '{}' updated (status {:?})", id, source.status);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Register devices found by a scan that are not yet bound to a source.
    /// New sources start in VALIDATING. Returns the ids created.
    pub fn merge_scan(&mut self, devices: &[VideoDevice]) -> Vec<String> {
        let mut created = Vec::new();

        for (index, device) in devices.iter().enumerate() {
            if self.find_by_device(&device.device_id).is_some() {
                continue;
            }

            let position = index + 1;
            let prefix: String = device.device_id.chars().take(4).collect();
            let label = device
                .label
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| format!("Camera {position}"));

            // ids of existing sources are never reused for another device
            let mut n = position;
            let mut id = format!("cam_{n}_{prefix}");
            while self.contains(&id) {
                n += 1;
                id = format!("cam_{n}_{prefix}");
            }

            let source = VideoSource {
                display_name: label.clone(),
                status: SourceStatus::Validating,
                device_id: Some(device.device_id.clone()),
                capabilities: device.capabilities.clone(),
                ..VideoSource::new(&id, &label, SourceType::Camera)
            };

            created.push(source.id.clone());
            self.insert(source);
        }

        if !created.is_empty() {
            log::info!("Discovered {} new video device(s)", created.len());
        }
        created
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(id: &str, device: Option<&str>) -> VideoSource {
        VideoSource {
            device_id: device.map(str::to_string),
            ..VideoSource::new(id, id, SourceType::Camera)
        }
    }

    #[test]
    fn test_safe_source_cannot_be_removed() {
        let mut registry = SourceRegistry::new();
        let before = registry.len();

        let result = registry.remove_source(SAFE_SOURCE_ID);

        assert_eq!(result, Err(RegistryError::ProtectedSource(SAFE_SOURCE_ID.to_string())));
        assert_eq!(registry.len(), before);
        assert_eq!(registry.get(SAFE_SOURCE_ID), Some(&VideoSource::safe_slate()));
    }

    #[test]
    fn test_safe_source_cannot_be_overwritten_or_modified() {
        let mut registry = SourceRegistry::new();
        let mut fake = VideoSource::safe_slate();
        fake.status = SourceStatus::Error;

        assert!(registry.add_source(fake).is_err());
        assert!(registry
            .update_source_metadata(SAFE_SOURCE_ID, SourceUpdate::status(SourceStatus::Error))
            .is_err());
        assert_eq!(registry.safe_source().status, SourceStatus::Ok);
    }

    #[test]
    fn test_from_sources_always_seeds_safe_slate() {
        let registry = SourceRegistry::from_sources(vec![camera("cam1", None)]);
        assert_eq!(registry.sources()[0].id, SAFE_SOURCE_ID);
        assert_eq!(registry.len(), 2);

        let empty = SourceRegistry::from_sources(Vec::new());
        assert_eq!(empty.len(), 1);
        assert!(!empty.is_empty());
    }

    #[test]
    fn test_add_same_id_replaces_in_place() {
        let mut registry = SourceRegistry::from_sources(vec![camera("cam1", None), camera("cam2", None)]);
        let mut updated = camera("cam1", None);
        updated.label = "New Label".to_string();

        assert_eq!(registry.add_source(updated), Ok(AddOutcome::Replaced));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.sources()[1].label, "New Label");
    }

    #[test]
    fn test_device_handle_moves_to_new_source() {
        let mut registry = SourceRegistry::from_sources(vec![camera("old", Some("dev-1"))]);

        let outcome = registry.add_source(camera("new", Some("dev-1"))).unwrap();

        assert_eq!(outcome, AddOutcome::DeviceReassigned { previous_id: "old".to_string() });
        assert!(!registry.contains("old"));
        assert_eq!(registry.find_by_device("dev-1").map(|s| s.id.as_str()), Some("new"));
    }

    #[test]
    fn test_update_merges_and_ignores_unknown() {
        let mut registry = SourceRegistry::new();

        let updated = registry
            .update_source_metadata("cam1", SourceUpdate::status(SourceStatus::NoSignal))
            .unwrap();
        assert!(updated);
        assert_eq!(registry.get("cam1").unwrap().status, SourceStatus::NoSignal);
        assert_eq!(registry.get("cam1").unwrap().label, "CAM 1");

        let before = registry.sources().to_vec();
        assert_eq!(
            registry.update_source_metadata("ghost", SourceUpdate::status(SourceStatus::Error)),
            Ok(false)
        );
        assert_eq!(registry.sources(), &before[..]);
    }

    #[test]
    fn test_update_cannot_steal_device() {
        let mut registry =
            SourceRegistry::from_sources(vec![camera("a", Some("dev-a")), camera("b", None)]);

        registry
            .update_source_metadata(
                "b",
                SourceUpdate {
                    device_id: Some(Some("dev-a".to_string())),
                    label: Some("B".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let b = registry.get("b").unwrap();
        assert!(b.device_id.is_none());
        assert_eq!(b.label, "B");
        assert_eq!(registry.find_by_device("dev-a").unwrap().id, "a");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = SourceRegistry::new();
        assert_eq!(registry.remove_source("ghost"), Ok(None));
        assert!(registry.remove_source("cam2").unwrap().is_some());
        assert!(!registry.contains("cam2"));
    }

    #[test]
    fn test_merge_scan_creates_validating_cameras() {
        let mut registry = SourceRegistry::from_sources(vec![camera("cam1", Some("known-device"))]);
        let devices = vec![
            VideoDevice { device_id: "known-device".to_string(), label: Some("Old".to_string()), capabilities: None },
            VideoDevice { device_id: "f00dbabe".to_string(), label: None, capabilities: None },
        ];

        let created = registry.merge_scan(&devices);

        assert_eq!(created, vec!["cam_2_f00d".to_string()]);
        let source = registry.get("cam_2_f00d").unwrap();
        assert_eq!(source.label, "Camera 2");
        assert_eq!(source.status, SourceStatus::Validating);
        assert_eq!(source.device_id.as_deref(), Some("f00dbabe"));

        // a second scan finds nothing new
        assert!(registry.merge_scan(&devices).is_empty());
    }

    #[test]
    fn test_rescan_in_new_order_keeps_existing_bindings() {
        let mut registry = SourceRegistry::from_sources(Vec::new());
        let cam_a = VideoDevice { device_id: "usb-1111".to_string(), label: Some("Cam A".to_string()), capabilities: None };
        let cam_b = VideoDevice { device_id: "usb-2222".to_string(), label: Some("Cam B".to_string()), capabilities: None };

        assert_eq!(registry.merge_scan(&[cam_a.clone()]), vec!["cam_1_usb-".to_string()]);

        let created = registry.merge_scan(&[cam_b, cam_a]);

        assert_eq!(created, vec!["cam_2_usb-".to_string()]);
        assert_eq!(registry.len(), 3);
        let first = registry.get("cam_1_usb-").unwrap();
        assert_eq!(first.device_id.as_deref(), Some("usb-1111"));
        assert_eq!(first.label, "Cam A");
        let second = registry.get("cam_2_usb-").unwrap();
        assert_eq!(second.device_id.as_deref(), Some("usb-2222"));
        assert_eq!(second.label, "Cam B");
    }
}
