//! Audio Transcoder Port - 音频转码抽象
//!
//! 定义音频容器格式转换的抽象接口（MP3 → WAV）

use async_trait::async_trait;
use thiserror::Error;

/// 转码错误
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// 转码结果
#[derive(Debug, Clone)]
pub struct TranscodeResult {
    /// 转码后的音频数据（WAV 容器）
    pub audio_data: Vec<u8>,
    /// 时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
    /// 声道数
    pub channels: u8,
    /// 原始大小（字节）
    pub original_size: usize,
    /// 转码后大小（字节）
    pub transcoded_size: usize,
}

/// Audio Transcoder Port
///
/// 音频转码的抽象接口
#[async_trait]
pub trait AudioTranscoderPort: Send + Sync {
    /// 将 MP3 音频转码为 WAV 容器
    ///
    /// # Arguments
    /// * `mp3_data` - 输入的 MP3 音频数据
    ///
    /// # Returns
    /// 转码后的 WAV 数据和元信息
    async fn mp3_to_wav(&self, mp3_data: &[u8]) -> Result<TranscodeResult, TranscodeError>;
}
