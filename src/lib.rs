//! Parlo - 语音合成网关
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech: 合成文本、音频产物等值对象
//! - User: 演示用用户记录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechEngine, AudioTranscoder, UserStore）
//! - Commands: 合成管线（SynthesizeSpeechHandler）
//! - Queries: 音色目录查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Edge TTS 客户端、WAV 转码器
//! - Memory: UserStore 内存实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
