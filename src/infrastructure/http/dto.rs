//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// Speech DTOs
// ============================================================================

/// 合成请求体
#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,

    /// 音色短名
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 语速（带符号百分比）
    #[serde(default = "default_percentage")]
    pub rate: String,

    /// 音量（带符号百分比）
    #[serde(default = "default_percentage")]
    pub volume: String,
}

fn default_voice() -> String {
    "en-US-AriaNeural".to_string()
}

fn default_percentage() -> String {
    "+0%".to_string()
}

// ============================================================================
// Voice DTOs
// ============================================================================

/// 音色目录条目响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub display_name: String,
    pub short_name: String,
    pub gender: String,
    pub locale: String,
}

/// 音色目录响应
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceResponse>,
}

// ============================================================================
// User DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
