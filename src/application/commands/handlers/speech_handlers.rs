//! Speech Command Handlers - 合成管线
//!
//! 单次线性流程：验证文本 → 预留临时文件 → 引擎合成写入 →
//! 读取字节 → 按变体转码 → 返回产物。无重试、无退避、无部分结果。
//!
//! 核心不变量：无论哪一步成功或失败，临时文件在管线返回前被删除
//! 恰好一次，不会泄漏到单次调用之外。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::{OutputVariant, SynthesizeSpeech};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioTranscoderPort, SpeechEnginePort, SynthesisSpec};
use crate::application::temp::ScopedTempFile;
use crate::domain::{AudioArtifact, SpeechText};

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    engine: Arc<dyn SpeechEnginePort>,
    transcoder: Arc<dyn AudioTranscoderPort>,
    temp_dir: PathBuf,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        engine: Arc<dyn SpeechEnginePort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            engine,
            transcoder,
            temp_dir,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<AudioArtifact, ApplicationError> {
        // 验证必须发生在任何引擎调用之前
        let text = SpeechText::new(&command.text)
            .map_err(ApplicationError::validation)?;

        let spec = SynthesisSpec {
            text: text.as_str().to_string(),
            voice: command.voice,
            rate: command.rate,
            volume: command.volume,
        };

        let temp = ScopedTempFile::create_in(&self.temp_dir)
            .map_err(ApplicationError::synthesis)?;

        let result = self.run(&spec, temp.path(), command.variant).await;

        // temp 在此离开作用域，所有退出路径统一删除临时文件；
        // 删除失败只记录日志，不掩盖 result 中的原始错误
        drop(temp);

        result
    }

    /// 管线主体（临时文件的创建与删除在 handle 中完成）
    async fn run(
        &self,
        spec: &SynthesisSpec,
        temp_path: &Path,
        variant: OutputVariant,
    ) -> Result<AudioArtifact, ApplicationError> {
        self.engine
            .synthesize_to_file(spec, temp_path)
            .await
            .map_err(ApplicationError::synthesis)?;

        let raw = tokio::fs::read(temp_path)
            .await
            .map_err(ApplicationError::synthesis)?;

        tracing::debug!(
            voice = %spec.voice,
            text_len = spec.text.len(),
            audio_size = raw.len(),
            "Synthesis completed"
        );

        match variant {
            OutputVariant::Stream => Ok(AudioArtifact::mpeg(raw)),
            OutputVariant::Download => {
                let transcoded = self
                    .transcoder
                    .mp3_to_wav(&raw)
                    .await
                    .map_err(ApplicationError::synthesis)?;

                tracing::debug!(
                    original_size = transcoded.original_size,
                    transcoded_size = transcoded.transcoded_size,
                    duration_ms = transcoded.duration_ms,
                    "Transcoded to WAV"
                );

                Ok(AudioArtifact::wav(transcoded.audio_data))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaType;
    use crate::infrastructure::adapters::{FakeSpeechEngine, FakeTranscoder};

    fn command(text: &str, variant: OutputVariant) -> SynthesizeSpeech {
        SynthesizeSpeech {
            text: text.to_string(),
            voice: "en-US-AriaNeural".to_string(),
            rate: "+0%".to_string(),
            volume: "+0%".to_string(),
            variant,
        }
    }

    fn handler_with(
        engine: Arc<FakeSpeechEngine>,
        transcoder: Arc<FakeTranscoder>,
        temp_dir: &Path,
    ) -> SynthesizeSpeechHandler {
        SynthesizeSpeechHandler::new(engine, transcoder, temp_dir.to_path_buf())
    }

    fn temp_dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_engine_call() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::new(b"mp3".to_vec()));
        let handler = handler_with(engine.clone(), Arc::new(FakeTranscoder::new()), dir.path());

        let err = handler
            .handle(command("", OutputVariant::Download))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(err.to_string(), "Text cannot be empty");
        assert_eq!(engine.call_count(), 0);
        assert!(temp_dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_whitespace_text_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::new(b"mp3".to_vec()));
        let handler = handler_with(engine.clone(), Arc::new(FakeTranscoder::new()), dir.path());

        let err = handler
            .handle(command("   \n", OutputVariant::Stream))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(engine.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stream_variant_returns_raw_engine_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::new(b"raw-mp3-bytes".to_vec()));
        let handler = handler_with(engine.clone(), Arc::new(FakeTranscoder::new()), dir.path());

        let artifact = handler
            .handle(command("Hello world", OutputVariant::Stream))
            .await
            .unwrap();

        assert_eq!(artifact.media_type, MediaType::Mpeg);
        assert_eq!(artifact.data, b"raw-mp3-bytes");
        assert_eq!(engine.call_count(), 1);
        assert!(temp_dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_download_variant_returns_wav() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::new(b"raw-mp3-bytes".to_vec()));
        let handler = handler_with(engine, Arc::new(FakeTranscoder::new()), dir.path());

        let artifact = handler
            .handle(command("Hello world", OutputVariant::Download))
            .await
            .unwrap();

        assert_eq!(artifact.media_type, MediaType::Wav);
        assert_eq!(&artifact.data[0..4], b"RIFF");
        assert!(temp_dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_engine_failure_maps_to_synthesis_error_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::failing());
        let handler = handler_with(engine, Arc::new(FakeTranscoder::new()), dir.path());

        let err = handler
            .handle(command("Hello world", OutputVariant::Download))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::SynthesisError(_)));
        assert!(err.to_string().starts_with("TTS conversion failed"));
        assert!(temp_dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_transcode_failure_maps_to_synthesis_error_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::new(b"mp3".to_vec()));
        let handler = handler_with(engine, Arc::new(FakeTranscoder::failing()), dir.path());

        let err = handler
            .handle(command("Hello world", OutputVariant::Download))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::SynthesisError(_)));
        assert!(temp_dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_stream_variant_skips_transcoder() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(FakeSpeechEngine::new(b"mp3".to_vec()));
        // 转码器配置为失败；流式变体不应触碰它
        let handler = handler_with(engine, Arc::new(FakeTranscoder::failing()), dir.path());

        let artifact = handler
            .handle(command("Hello world", OutputVariant::Stream))
            .await
            .unwrap();

        assert_eq!(artifact.media_type, MediaType::Mpeg);
    }
}
