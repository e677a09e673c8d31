//! Speech Engine Port - 合成引擎抽象
//!
//! 定义外部语音合成服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 合成引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Engine returned no audio")]
    NoAudio,

    #[error("IO error: {0}")]
    IoError(String),
}

/// 合成参数
#[derive(Debug, Clone)]
pub struct SynthesisSpec {
    /// 要合成的文本内容
    pub text: String,
    /// 音色短名（如 en-US-AriaNeural）
    pub voice: String,
    /// 语速（带符号百分比字符串，如 +0%）
    pub rate: String,
    /// 音量（带符号百分比字符串，如 +0%）
    pub volume: String,
}

/// 服务端音色目录条目
///
/// 字段已从服务端的 PascalCase 命名映射为本地命名，只读，不做本地修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderVoice {
    pub display_name: String,
    pub short_name: String,
    pub gender: String,
    pub locale: String,
}

/// Speech Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 执行语音合成
    ///
    /// 将编码后的音频（MP3）写入 `output` 指定的文件路径
    async fn synthesize_to_file(
        &self,
        spec: &SynthesisSpec,
        output: &Path,
    ) -> Result<(), EngineError>;

    /// 枚举可用音色
    ///
    /// 每次调用都重新查询服务端，不做缓存
    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, EngineError>;
}
