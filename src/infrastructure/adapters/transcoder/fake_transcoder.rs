//! Fake Transcoder - 用于测试的转码器
//!
//! 不做真实解码，仅把输入包进一个带 RIFF 头的假 WAV 容器；
//! 可配置为始终失败

use async_trait::async_trait;

use crate::application::ports::{AudioTranscoderPort, TranscodeError, TranscodeResult};

/// Fake Transcoder
pub struct FakeTranscoder {
    fail: bool,
}

impl FakeTranscoder {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// 创建始终失败的转码器
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Default for FakeTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioTranscoderPort for FakeTranscoder {
    async fn mp3_to_wav(&self, mp3_data: &[u8]) -> Result<TranscodeResult, TranscodeError> {
        if self.fail {
            return Err(TranscodeError::DecodingError(
                "simulated transcode failure".to_string(),
            ));
        }

        let mut wav = Vec::with_capacity(12 + mp3_data.len());
        wav.extend_from_slice(b"RIFF\0\0\0\0WAVE");
        wav.extend_from_slice(mp3_data);

        Ok(TranscodeResult {
            transcoded_size: wav.len(),
            audio_data: wav,
            duration_ms: 0,
            sample_rate: 24000,
            channels: 1,
            original_size: mp3_data.len(),
        })
    }
}
