//! Speech Commands - 合成命令定义

/// 输出变体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputVariant {
    /// 下载：转码为 WAV 容器返回
    Download,
    /// 流式：返回引擎原始 MP3 字节，不转码
    Stream,
}

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub voice: String,
    pub rate: String,
    pub volume: String,
    pub variant: OutputVariant,
}
