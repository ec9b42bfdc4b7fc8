// Overlay Model
// Renderable compositing instructions layered over PGM

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverlayType {
    Scoreboard,
    LowerThird,
    ChatLower,
    Ticker,
    Logo,
    Commerce,
    Sponsor,
    Widget,
    SocialProof,
    Alert,
}

/// OverlayLayer - one layer handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub overlay_type: OverlayType,
    pub visible: bool,
    /// Render order, ascending
    pub z_index: i32,
    /// Renderer-specific payload
    #[serde(default)]
    pub data: Value,
}

impl OverlayLayer {
    pub fn new(overlay_type: OverlayType, z_index: i32, data: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            overlay_type,
            visible: true,
            z_index,
            data,
        }
    }
}

/// Operator-managed graphics (tickers, logos, sponsors, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsState {
    pub overlays: Vec<OverlayLayer>,
}
