//! Domain Layer - 领域层
//!
//! 包含两个上下文:
//! - Speech: 语音合成（文本、音频产物）
//! - User: 演示用用户记录

pub mod speech;
pub mod user;

pub use speech::{AudioArtifact, MediaType, SpeechText};
pub use user::{User, UserPatch};
