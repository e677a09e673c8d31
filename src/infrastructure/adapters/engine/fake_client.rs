//! Fake Speech Engine - 用于测试的合成引擎
//!
//! 返回固定的音频字节，不实际调用外部服务；
//! 记录调用次数，可配置为始终失败

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{EngineError, ProviderVoice, SpeechEnginePort, SynthesisSpec};

/// Fake Speech Engine
pub struct FakeSpeechEngine {
    /// 固定返回的音频数据
    audio: Vec<u8>,
    /// 固定返回的音色目录
    voices: Vec<ProviderVoice>,
    /// 是否模拟引擎失败
    fail: bool,
    /// synthesize / list_voices 的累计调用次数
    calls: AtomicUsize,
}

impl FakeSpeechEngine {
    /// 创建返回固定音频的引擎
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio,
            voices: Vec::new(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// 创建始终失败的引擎
    pub fn failing() -> Self {
        Self {
            audio: Vec::new(),
            voices: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// 配置音色目录
    pub fn with_voices(mut self, voices: Vec<ProviderVoice>) -> Self {
        self.voices = voices;
        self
    }

    /// 累计调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechEngine {
    async fn synthesize_to_file(
        &self,
        spec: &SynthesisSpec,
        output: &Path,
    ) -> Result<(), EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(EngineError::ServiceError(
                "simulated engine failure".to_string(),
            ));
        }

        tracing::debug!(
            voice = %spec.voice,
            text_len = spec.text.len(),
            "FakeSpeechEngine: writing fixed audio"
        );

        tokio::fs::write(output, &self.audio)
            .await
            .map_err(|e| EngineError::IoError(e.to_string()))
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(EngineError::ServiceError(
                "simulated engine failure".to_string(),
            ));
        }

        Ok(self.voices.clone())
    }
}
