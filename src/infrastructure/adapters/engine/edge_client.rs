//! Edge TTS Client - 调用 Edge 朗读服务
//!
//! 实现 SpeechEnginePort trait：
//! - 音色目录：HTTPS GET voices/list（reqwest）
//! - 语音合成：WebSocket 通道（tokio-tungstenite），
//!   先发送 speech.config 选择输出格式，再发送 SSML，
//!   收集 Path:audio 的二进制帧直到 turn.end

use async_trait::async_trait;
use futures_util::{SinkExt, Stream, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::connect_async;

use crate::application::ports::{EngineError, ProviderVoice, SpeechEnginePort, SynthesisSpec};

/// 服务端访问令牌（Edge 浏览器内置值）
const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";

/// Sec-MS-GEC-Version 查询参数值
const SEC_MS_GEC_VERSION: &str = "1-130.0.2849.68";

/// 合成输出格式
const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// WebSocket 握手时的 Origin（Edge 朗读扩展）
const WSS_ORIGIN: &str = "chrome-extension://jdiccldimpdaibmpdkjnbmckianbfold";

/// Windows 纪元（1601-01-01）与 Unix 纪元的秒差
const WINDOWS_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

/// Edge TTS 客户端配置
#[derive(Debug, Clone)]
pub struct EdgeTtsClientConfig {
    /// 音色目录查询 URL
    pub voices_url: String,
    /// 合成通道 WebSocket URL
    pub synthesis_url: String,
}

impl Default for EdgeTtsClientConfig {
    fn default() -> Self {
        Self {
            voices_url:
                "https://speech.platform.bing.com/consumer/speech/synthesize/readaloud/voices/list"
                    .to_string(),
            synthesis_url:
                "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1"
                    .to_string(),
        }
    }
}

/// 服务端音色目录条目（PascalCase JSON）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EdgeVoice {
    friendly_name: String,
    short_name: String,
    gender: String,
    locale: String,
}

/// Edge TTS 客户端
pub struct EdgeTtsClient {
    client: Client,
    config: EdgeTtsClientConfig,
}

impl EdgeTtsClient {
    /// 创建新的 Edge TTS 客户端
    pub fn new(config: EdgeTtsClientConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, EngineError> {
        Self::new(EdgeTtsClientConfig::default())
    }

    /// 音色目录查询 URL（含鉴权参数）
    fn voices_url(&self) -> String {
        format!(
            "{}?trustedclienttoken={}&Sec-MS-GEC={}&Sec-MS-GEC-Version={}",
            self.config.voices_url,
            TRUSTED_CLIENT_TOKEN,
            gec_token(),
            SEC_MS_GEC_VERSION,
        )
    }

    /// 合成通道 URL（含鉴权参数与连接 ID）
    fn synthesis_url(&self) -> String {
        format!(
            "{}?TrustedClientToken={}&Sec-MS-GEC={}&Sec-MS-GEC-Version={}&ConnectionId={}",
            self.config.synthesis_url,
            TRUSTED_CLIENT_TOKEN,
            gec_token(),
            SEC_MS_GEC_VERSION,
            uuid::Uuid::new_v4().simple(),
        )
    }
}

/// 计算 Sec-MS-GEC 令牌
///
/// Windows 纪元 ticks（向下取整到 5 分钟窗口）拼接客户端令牌后取
/// SHA-256，大写十六进制编码
fn gec_token() -> String {
    gec_token_at(chrono::Utc::now().timestamp())
}

fn gec_token_at(unix_secs: i64) -> String {
    let windows_secs = unix_secs + WINDOWS_EPOCH_OFFSET_SECS;
    let rounded = windows_secs - (windows_secs % 300);
    let ticks = (rounded as u64) * 10_000_000;

    let digest = Sha256::digest(format!("{}{}", ticks, TRUSTED_CLIENT_TOKEN).as_bytes());
    digest.iter().map(|b| format!("{:02X}", b)).collect()
}

/// 转义 SSML 文本内容
fn escape_ssml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// 协议时间戳（服务端要求的 JS Date 格式）
fn protocol_timestamp() -> String {
    chrono::Utc::now()
        .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
        .to_string()
}

/// 构造 speech.config 消息
fn speech_config_message() -> String {
    format!(
        "X-Timestamp:{}\r\n\
         Content-Type:application/json; charset=utf-8\r\n\
         Path:speech.config\r\n\r\n\
         {{\"context\":{{\"synthesis\":{{\"audio\":{{\"metadataoptions\":{{\
         \"sentenceBoundaryEnabled\":\"false\",\"wordBoundaryEnabled\":\"false\"}},\
         \"outputFormat\":\"{}\"}}}}}}}}",
        protocol_timestamp(),
        OUTPUT_FORMAT,
    )
}

/// 构造 SSML 消息
fn ssml_message(request_id: &str, spec: &SynthesisSpec) -> String {
    let ssml = format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{}'><prosody pitch='+0Hz' rate='{}' volume='{}'>{}</prosody></voice>\
         </speak>",
        spec.voice,
        spec.rate,
        spec.volume,
        escape_ssml(&spec.text),
    );

    format!(
        "X-RequestId:{}\r\nContent-Type:application/ssml+xml\r\nX-Timestamp:{}Z\r\nPath:ssml\r\n\r\n{}",
        request_id,
        protocol_timestamp(),
        ssml,
    )
}

/// 从二进制帧中提取音频载荷
///
/// 帧格式：2 字节大端 header 长度 + header 文本 + 载荷；
/// 仅 header 含 `Path:audio` 的帧携带音频数据
fn extract_audio_payload(frame: &[u8]) -> Option<&[u8]> {
    if frame.len() < 2 {
        return None;
    }
    let header_len = u16::from_be_bytes([frame[0], frame[1]]) as usize;
    if frame.len() < 2 + header_len {
        return None;
    }
    let header = std::str::from_utf8(&frame[2..2 + header_len]).ok()?;
    if !header.contains("Path:audio") {
        return None;
    }
    Some(&frame[2 + header_len..])
}

/// 从合成通道收集音频载荷，直到 turn.end
///
/// 通道在 turn.end 之前被关闭（Close 帧或流结束）视为协议错误，
/// 已收到的部分音频不作为成功结果返回
async fn collect_audio<S>(stream: &mut S) -> Result<Vec<u8>, EngineError>
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let mut audio: Vec<u8> = Vec::new();
    let mut turn_ended = false;

    while let Some(message) = stream.next().await {
        let message = message.map_err(|e| EngineError::NetworkError(e.to_string()))?;

        match message {
            Message::Text(text) => {
                if text.contains("Path:turn.end") {
                    turn_ended = true;
                    break;
                }
            }
            Message::Binary(frame) => {
                if let Some(payload) = extract_audio_payload(&frame) {
                    audio.extend_from_slice(payload);
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    if !turn_ended {
        return Err(EngineError::ProtocolError(
            "Synthesis channel closed before turn.end".to_string(),
        ));
    }

    if audio.is_empty() {
        return Err(EngineError::NoAudio);
    }

    Ok(audio)
}

#[async_trait]
impl SpeechEnginePort for EdgeTtsClient {
    async fn synthesize_to_file(
        &self,
        spec: &SynthesisSpec,
        output: &Path,
    ) -> Result<(), EngineError> {
        let url = self.synthesis_url();
        let request_id = uuid::Uuid::new_v4().simple().to_string();

        tracing::debug!(
            voice = %spec.voice,
            rate = %spec.rate,
            volume = %spec.volume,
            text_len = spec.text.len(),
            "Opening synthesis channel"
        );

        let mut request = url
            .into_client_request()
            .map_err(|e| EngineError::ProtocolError(e.to_string()))?;
        request.headers_mut().insert(
            "Origin",
            WSS_ORIGIN
                .parse()
                .map_err(|_| EngineError::ProtocolError("Invalid origin header".to_string()))?,
        );

        let (mut ws_stream, _) = connect_async(request)
            .await
            .map_err(|e| EngineError::NetworkError(format!("Cannot connect to TTS service: {}", e)))?;

        ws_stream
            .send(Message::Text(speech_config_message()))
            .await
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        ws_stream
            .send(Message::Text(ssml_message(&request_id, spec)))
            .await
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        let collected = collect_audio(&mut ws_stream).await;

        let _ = ws_stream.close(None).await;

        let audio = collected?;

        tokio::fs::write(output, &audio)
            .await
            .map_err(|e| EngineError::IoError(e.to_string()))?;

        tracing::info!(
            request_id = %request_id,
            audio_size = audio.len(),
            output = %output.display(),
            "Synthesis audio written"
        );

        Ok(())
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, EngineError> {
        let response = self
            .client
            .get(self.voices_url())
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    EngineError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    EngineError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let voices: Vec<EdgeVoice> = response
            .json()
            .await
            .map_err(|e| EngineError::ProtocolError(format!("Failed to parse voices: {}", e)))?;

        tracing::info!(count = voices.len(), "Voice catalog fetched from engine");

        Ok(voices
            .into_iter()
            .map(|v| ProviderVoice {
                display_name: v.friendly_name,
                short_name: v.short_name,
                gender: v.gender,
                locale: v.locale,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gec_token_is_stable_within_window() {
        // 对齐到 5 分钟窗口起点，窗口内从首秒到末秒产生同一令牌
        let base = 1_700_000_000 - ((1_700_000_000 + WINDOWS_EPOCH_OFFSET_SECS) % 300);
        let a = gec_token_at(base);
        let b = gec_token_at(base + 299);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_gec_token_changes_across_windows() {
        let a = gec_token_at(1_700_000_000);
        let b = gec_token_at(1_700_000_000 + 600);
        assert_ne!(a, b);
    }

    #[test]
    fn test_escape_ssml() {
        assert_eq!(
            escape_ssml("a & b <c> 'd' \"e\""),
            "a &amp; b &lt;c&gt; &apos;d&apos; &quot;e&quot;"
        );
    }

    #[test]
    fn test_ssml_message_contains_voice_and_prosody() {
        let spec = SynthesisSpec {
            text: "Hello".to_string(),
            voice: "en-US-AriaNeural".to_string(),
            rate: "+10%".to_string(),
            volume: "-5%".to_string(),
        };
        let msg = ssml_message("abc123", &spec);
        assert!(msg.starts_with("X-RequestId:abc123\r\n"));
        assert!(msg.contains("Path:ssml"));
        assert!(msg.contains("<voice name='en-US-AriaNeural'>"));
        assert!(msg.contains("rate='+10%' volume='-5%'"));
    }

    #[test]
    fn test_extract_audio_payload_from_valid_frame() {
        let header = b"X-RequestId:1\r\nPath:audio\r\n";
        let mut frame = Vec::new();
        frame.extend_from_slice(&(header.len() as u16).to_be_bytes());
        frame.extend_from_slice(header);
        frame.extend_from_slice(b"AUDIO");

        assert_eq!(extract_audio_payload(&frame), Some(&b"AUDIO"[..]));
    }

    #[test]
    fn test_extract_audio_payload_ignores_non_audio_frames() {
        let header = b"Path:turn.start\r\n";
        let mut frame = Vec::new();
        frame.extend_from_slice(&(header.len() as u16).to_be_bytes());
        frame.extend_from_slice(header);
        frame.extend_from_slice(b"XYZ");

        assert_eq!(extract_audio_payload(&frame), None);
    }

    #[test]
    fn test_extract_audio_payload_rejects_truncated_frame() {
        assert_eq!(extract_audio_payload(&[0x00]), None);
        // header 长度声明超出帧实际长度
        assert_eq!(extract_audio_payload(&[0x00, 0xFF, b'x']), None);
    }

    #[test]
    fn test_speech_config_selects_mp3_output() {
        let msg = speech_config_message();
        assert!(msg.contains("Path:speech.config"));
        assert!(msg.contains("audio-24khz-48kbitrate-mono-mp3"));
    }

    fn audio_frame(payload: &[u8]) -> Message {
        let header = b"X-RequestId:1\r\nPath:audio\r\n";
        let mut frame = Vec::new();
        frame.extend_from_slice(&(header.len() as u16).to_be_bytes());
        frame.extend_from_slice(header);
        frame.extend_from_slice(payload);
        Message::Binary(frame)
    }

    fn turn_end() -> Message {
        Message::Text("X-RequestId:1\r\nPath:turn.end\r\n\r\n{}".to_string())
    }

    async fn collect_from(messages: Vec<Message>) -> Result<Vec<u8>, EngineError> {
        let mut stream = futures_util::stream::iter(messages.into_iter().map(Ok));
        collect_audio(&mut stream).await
    }

    #[tokio::test]
    async fn test_collect_audio_until_turn_end() {
        let audio = collect_from(vec![
            audio_frame(b"ABC"),
            audio_frame(b"DEF"),
            turn_end(),
        ])
        .await
        .unwrap();

        assert_eq!(audio, b"ABCDEF");
    }

    #[tokio::test]
    async fn test_collect_audio_rejects_close_before_turn_end() {
        // 部分音频已收到，但通道提前关闭：不得作为成功结果返回
        let err = collect_from(vec![audio_frame(b"ABC"), Message::Close(None)])
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::ProtocolError(_)));
    }

    #[tokio::test]
    async fn test_collect_audio_rejects_stream_end_before_turn_end() {
        let err = collect_from(vec![audio_frame(b"ABC")]).await.unwrap_err();
        assert!(matches!(err, EngineError::ProtocolError(_)));
    }

    #[tokio::test]
    async fn test_collect_audio_rejects_empty_turn() {
        let err = collect_from(vec![turn_end()]).await.unwrap_err();
        assert!(matches!(err, EngineError::NoAudio));
    }
}
