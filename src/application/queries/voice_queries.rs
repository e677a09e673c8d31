//! Voice Queries - 音色目录查询定义

/// 列出所有可用音色
#[derive(Debug, Clone, Copy)]
pub struct ListVoices;
