// Graphics Engine
// Operator-managed overlays (tickers, logos, sponsors, widgets)

use serde_json::Value;

use crate::models::{GraphicsState, OverlayLayer};

#[derive(Default)]
pub struct GraphicsEngine {
    state: GraphicsState,
}

impl GraphicsEngine {
    pub fn new(overlays: Vec<OverlayLayer>) -> Self {
        Self {
            state: GraphicsState { overlays },
        }
    }

    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    pub fn add_overlay(&mut self, overlay: OverlayLayer) {
        match self.state.overlays.iter_mut().find(|o| o.id == overlay.id) {
            Some(existing) => *existing = overlay,
            None => self.state.overlays.push(overlay),
        }
    }

    pub fn remove_overlay(&mut self, id: &str) -> Option<OverlayLayer> {
        let pos = self.state.overlays.iter().position(|o| o.id == id)?;
        Some(self.state.overlays.remove(pos))
    }

    /// Flip visibility; returns the new value, or `None` for unknown ids
    pub fn toggle_overlay(&mut self, id: &str) -> Option<bool> {
        let overlay = self.state.overlays.iter_mut().find(|o| o.id == id)?;
        overlay.visible = !overlay.visible;
        Some(overlay.visible)
    }

    pub fn update_overlay_data(&mut self, id: &str, data: Value) -> bool {
        match self.state.overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) => {
                overlay.data = data;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OverlayType;
    use serde_json::json;

    #[test]
    fn test_toggle_and_update() {
        let mut graphics = GraphicsEngine::default();
        let ticker = OverlayLayer::new(OverlayType::Ticker, 30, json!({ "text": "Breaking" }));
        let id = ticker.id.clone();
        graphics.add_overlay(ticker);

        assert_eq!(graphics.toggle_overlay(&id), Some(false));
        assert_eq!(graphics.toggle_overlay(&id), Some(true));
        assert_eq!(graphics.toggle_overlay("missing"), None);

        assert!(graphics.update_overlay_data(&id, json!({ "text": "Final score" })));
        assert_eq!(graphics.state().overlays[0].data["text"], "Final score");

        assert!(graphics.remove_overlay(&id).is_some());
        assert!(graphics.state().overlays.is_empty());
    }
}
