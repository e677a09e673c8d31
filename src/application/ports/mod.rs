//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_transcoder;
mod speech_engine;
mod user_store;

pub use audio_transcoder::{AudioTranscoderPort, TranscodeError, TranscodeResult};
pub use speech_engine::{EngineError, ProviderVoice, SpeechEnginePort, SynthesisSpec};
pub use user_store::{UserStoreError, UserStorePort};
