//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEngine、AudioTranscoder、UserStore）
//! - commands: 合成命令及处理器（合成管线）
//! - queries: 音色目录查询及处理器
//! - temp: 临时音频文件守卫
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod temp;

// Re-exports
pub use commands::{
    handlers::SynthesizeSpeechHandler,
    OutputVariant,
    SynthesizeSpeech,
};

pub use error::ApplicationError;

pub use ports::{
    // Audio transcoder
    AudioTranscoderPort,
    TranscodeError,
    TranscodeResult,
    // Speech engine
    EngineError,
    ProviderVoice,
    SpeechEnginePort,
    SynthesisSpec,
    // User store
    UserStoreError,
    UserStorePort,
};

pub use queries::{
    handlers::{ListVoicesHandler, VoiceDescriptor},
    ListVoices,
};

pub use temp::ScopedTempFile;
