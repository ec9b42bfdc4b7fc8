// RTMP Model
// Outbound stream target captured by the setup flow

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RtmpStatus {
    #[default]
    Idle,
    Streaming,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtmpConfig {
    pub url: String,
    pub key: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub status: RtmpStatus,
}
