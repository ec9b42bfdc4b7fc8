// Automation Model
// Macro steps and director (voice) commands as typed actions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One macro step. Wire form: `{ "type": "SCENE_RECALL", "payload": "scene_start" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacroAction {
    /// Put a scene straight on PGM
    SceneRecall(String),
    /// Pause the macro for the given milliseconds
    Wait(u64),
    /// Flip a graphics overlay's visibility
    OverlayToggle(String),
    AudioMute(String),
    AudioUnmute(String),
    /// Stage a source or scene on PVW
    SourcePvw(String),
    /// Run the configured transition
    Auto,
    Cut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroColor {
    Red,
    Green,
    Blue,
    Zinc,
    Amber,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    pub id: String,
    pub label: String,
    pub color: MacroColor,
    pub actions: Vec<MacroAction>,
}

pub fn default_macros() -> Vec<Macro> {
    use MacroAction::*;
    vec![
        Macro {
            id: "intro_seq".to_string(),
            label: "INTRO SEQ".to_string(),
            color: MacroColor::Blue,
            actions: vec![
                SceneRecall("scene_start".to_string()),
                Wait(5000),
                SceneRecall("scene_talk".to_string()),
                OverlayToggle("lower_third".to_string()),
            ],
        },
        Macro {
            id: "break".to_string(),
            label: "GO TO BREAK".to_string(),
            color: MacroColor::Amber,
            actions: vec![
                AudioMute("cam1".to_string()),
                AudioMute("cam2".to_string()),
                SceneRecall("scene_start".to_string()),
            ],
        },
        Macro {
            id: "replay_hit".to_string(),
            label: "REPLAY HIT".to_string(),
            color: MacroColor::Red,
            actions: vec![
                SourcePvw("cam3".to_string()),
                Auto,
                Wait(4000),
                SourcePvw("cam1".to_string()),
                Auto,
            ],
        },
        Macro {
            id: "mic_check".to_string(),
            label: "MIC CHECK".to_string(),
            color: MacroColor::Zinc,
            actions: vec![AudioUnmute("cam1".to_string())],
        },
    ]
}

/// Graphics layers a director command can key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GfxLayer {
    Scoreboard,
    Chat,
    Commerce,
}

/// Director command, typically produced by the voice intent parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorCommand {
    /// With a target: straight to PGM. Without: swap PGM/PVW.
    Cut { target: Option<String> },
    Pvw { target: String },
    /// Replay playback lives outside the switcher core
    Replay { clip: Option<String> },
    Gfx { layer: GfxLayer },
    CommercePush { product_id: String },
}

/// Raw intent as returned by the intent parser: `{ "action": "CUT", "payload": "cam1" }`
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceIntent {
    pub action: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl TryFrom<VoiceIntent> for DirectorCommand {
    type Error = String;

    fn try_from(intent: VoiceIntent) -> Result<Self, Self::Error> {
        let payload = intent
            .payload
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        match intent.action.to_ascii_uppercase().as_str() {
            "CUT" => Ok(DirectorCommand::Cut { target: payload }),
            "PVW" => payload
                .map(|target| DirectorCommand::Pvw { target })
                .ok_or_else(|| "PVW requires a target".to_string()),
            "REPLAY" => Ok(DirectorCommand::Replay { clip: payload }),
            "GFX" => {
                let layer = match payload.as_deref().map(str::to_ascii_lowercase).as_deref() {
                    Some("scoreboard") => GfxLayer::Scoreboard,
                    Some("chat") => GfxLayer::Chat,
                    Some("commerce") => GfxLayer::Commerce,
                    other => return Err(format!("Unknown graphics layer: {other:?}")),
                };
                Ok(DirectorCommand::Gfx { layer })
            }
            "COMMERCE_PUSH" => payload
                .map(|product_id| DirectorCommand::CommercePush { product_id })
                .ok_or_else(|| "COMMERCE_PUSH requires a product id".to_string()),
            other => Err(format!("Unknown director action: {other}")),
        }
    }
}
