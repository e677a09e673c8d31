//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误（客户端输入非法）
    #[error("{0}")]
    ValidationError(String),

    /// 合成失败（引擎、文件 IO 或转码失败）
    #[error("TTS conversion failed: {0}")]
    SynthesisError(String),

    /// 音色目录查询失败
    #[error("Failed to fetch voices: {0}")]
    CatalogError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建合成错误（携带底层原因描述）
    pub fn synthesis(cause: impl std::fmt::Display) -> Self {
        Self::SynthesisError(cause.to_string())
    }

    /// 创建目录错误（携带底层原因描述）
    pub fn catalog(cause: impl std::fmt::Display) -> Self {
        Self::CatalogError(cause.to_string())
    }
}
