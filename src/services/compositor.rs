// Overlay Compositor
// Derives the ordered list of visible overlay layers from keyer flags,
// commerce state and operator graphics. Holds no state of its own.

use serde_json::Value;

use crate::models::{CommerceState, GraphicsState, KeyerState, OverlayLayer, OverlayType};

pub const SCOREBOARD_LAYER_ID: &str = "sb";
pub const CHAT_LAYER_ID: &str = "chat";
pub const COMMERCE_LAYER_ID: &str = "comm";

const SCOREBOARD_Z: i32 = 10;
const COMMERCE_Z: i32 = 15;
const CHAT_Z: i32 = 20;

/// Overlay composition for the renderer
pub struct OverlayCompositor;

impl OverlayCompositor {
    /// Build the render list: visible layers only, ascending z_index.
    ///
    /// Layers are merged as scoreboard, chat, commerce, then graphics-engine
    /// layers, and the sort is stable, so on equal z_index the system layers
    /// stay below operator graphics.
    pub fn compose(keyer: &KeyerState, commerce: &CommerceState, graphics: &GraphicsState) -> Vec<OverlayLayer> {
        let active_product = commerce
            .active_product()
            .and_then(|product| serde_json::to_value(product).ok())
            .unwrap_or(Value::Null);

        let system_layers = [
            Self::system_layer(SCOREBOARD_LAYER_ID, OverlayType::Scoreboard, keyer.dsk1_active, SCOREBOARD_Z, Value::Null),
            Self::system_layer(CHAT_LAYER_ID, OverlayType::ChatLower, keyer.dsk2_active, CHAT_Z, Value::Null),
            Self::system_layer(
                COMMERCE_LAYER_ID,
                OverlayType::Commerce,
                commerce.active_product_id.is_some(),
                COMMERCE_Z,
                active_product,
            ),
        ];

        let operator_layers = graphics
            .overlays
            .iter()
            .filter(|o| matches!(o.overlay_type, OverlayType::Ticker | OverlayType::Logo))
            .cloned();

        let mut layers: Vec<OverlayLayer> = system_layers
            .into_iter()
            .chain(operator_layers)
            .filter(|layer| layer.visible)
            .collect();

        layers.sort_by_key(|layer| layer.z_index);
        layers
    }

    fn system_layer(id: &str, overlay_type: OverlayType, visible: bool, z_index: i32, data: Value) -> OverlayLayer {
        OverlayLayer {
            id: id.to_string(),
            overlay_type,
            visible,
            z_index,
            data,
        }
    }
}
