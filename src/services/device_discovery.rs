// Device Discovery
// Injected seam for platform device enumeration

use serde::{Deserialize, Serialize};

use crate::models::SourceCapabilities;
use crate::services::SourceRegistry;

/// A video capture device reported by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDevice {
    pub device_id: String,
    /// Platform label; empty or missing before permissions are granted
    pub label: Option<String>,
    pub capabilities: Option<SourceCapabilities>,
}

/// Platform device enumeration, implemented outside the core
pub trait DeviceScanner: Send + Sync {
    fn scan_video_devices(&self) -> Result<Vec<VideoDevice>, String>;
}

/// Scan and register new devices. A failed scan leaves the registry untouched.
pub fn refresh_sources(scanner: &dyn DeviceScanner, registry: &mut SourceRegistry) -> Vec<String> {
    match scanner.scan_video_devices() {
        Ok(devices) => registry.merge_scan(&devices),
        Err(e) => {
            log::error!("Error scanning video devices: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeScanner(Result<Vec<VideoDevice>, String>);

    impl DeviceScanner for FakeScanner {
        fn scan_video_devices(&self) -> Result<Vec<VideoDevice>, String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_refresh_registers_devices() {
        let scanner = FakeScanner(Ok(vec![VideoDevice {
            device_id: "usb-1234".to_string(),
            label: Some("Logitech BRIO".to_string()),
            capabilities: None,
        }]));
        let mut registry = SourceRegistry::new();

        let created = refresh_sources(&scanner, &mut registry);

        assert_eq!(created, vec!["cam_1_usb-".to_string()]);
        assert_eq!(registry.get("cam_1_usb-").unwrap().label, "Logitech BRIO");
    }

    #[test]
    fn test_failed_scan_changes_nothing() {
        let scanner = FakeScanner(Err("permission denied".to_string()));
        let mut registry = SourceRegistry::new();
        let before = registry.len();

        assert!(refresh_sources(&scanner, &mut registry).is_empty());
        assert_eq!(registry.len(), before);
    }
}
