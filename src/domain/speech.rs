//! Speech Context - 语音合成值对象

/// 待合成文本
///
/// 不变量：非空且不全为空白字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechText(String);

impl SpeechText {
    pub fn new(text: impl Into<String>) -> Result<Self, &'static str> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err("Text cannot be empty");
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpeechText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// MP3（合成引擎原始输出）
    Mpeg,
    /// WAV（转码后输出）
    Wav,
}

impl MediaType {
    /// HTTP Content-Type 值
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Mpeg => "audio/mpeg",
            MediaType::Wav => "audio/wav",
        }
    }

    /// 下载文件名
    pub fn filename(&self) -> &'static str {
        match self {
            MediaType::Mpeg => "speech.mp3",
            MediaType::Wav => "speech.wav",
        }
    }
}

/// 音频产物
///
/// 单次请求生命周期内的内存字节载荷，不持久化
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub data: Vec<u8>,
    pub media_type: MediaType,
}

impl AudioArtifact {
    /// 引擎原始 MP3 输出
    pub fn mpeg(data: Vec<u8>) -> Self {
        Self {
            data,
            media_type: MediaType::Mpeg,
        }
    }

    /// 转码后的 WAV 输出
    pub fn wav(data: Vec<u8>) -> Self {
        Self {
            data,
            media_type: MediaType::Wav,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_text_rejects_empty() {
        assert!(SpeechText::new("").is_err());
    }

    #[test]
    fn test_speech_text_rejects_whitespace_only() {
        assert!(SpeechText::new("   \t\n").is_err());
    }

    #[test]
    fn test_speech_text_keeps_original_content() {
        let text = SpeechText::new("  Hello world  ").unwrap();
        assert_eq!(text.as_str(), "  Hello world  ");
    }

    #[test]
    fn test_media_type_content_types() {
        assert_eq!(MediaType::Mpeg.as_str(), "audio/mpeg");
        assert_eq!(MediaType::Wav.as_str(), "audio/wav");
        assert_eq!(MediaType::Mpeg.filename(), "speech.mp3");
        assert_eq!(MediaType::Wav.filename(), "speech.wav");
    }

    #[test]
    fn test_artifact_constructors() {
        let artifact = AudioArtifact::mpeg(vec![1, 2, 3]);
        assert_eq!(artifact.media_type, MediaType::Mpeg);
        assert_eq!(artifact.len(), 3);

        let artifact = AudioArtifact::wav(vec![]);
        assert_eq!(artifact.media_type, MediaType::Wav);
        assert!(artifact.is_empty());
    }
}
