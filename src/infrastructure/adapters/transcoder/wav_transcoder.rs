//! WAV Transcoder - 基于 symphonia 的音频转码器
//!
//! MP3 → 交织 f32 PCM → 16 位 PCM WAV 容器

use async_trait::async_trait;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioTranscoderPort, TranscodeError, TranscodeResult};

/// WAV 转码器
///
/// 基于 symphonia 实现，将合成引擎的 MP3 输出重新封装为 WAV
pub struct WavTranscoder;

impl WavTranscoder {
    pub fn new() -> Self {
        Self
    }

    /// 使用 symphonia 解码 MP3 获取 PCM 数据
    fn decode_mp3_to_pcm(&self, data: &[u8]) -> Result<DecodedAudio, TranscodeError> {
        if data.is_empty() {
            return Err(TranscodeError::InvalidInput(
                "MP3 data is empty".to_string(),
            ));
        }

        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("mp3");

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| TranscodeError::DecodingError(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| TranscodeError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| TranscodeError::DecodingError("Unknown sample rate".to_string()))?;

        let channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u8)
            .ok_or_else(|| TranscodeError::DecodingError("Unknown channel count".to_string()))?;

        let decoder_opts = DecoderOptions::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &decoder_opts)
            .map_err(|e| TranscodeError::DecodingError(format!("Decoder creation failed: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();
        let track_id = track.id;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(TranscodeError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            // Only take the actual samples, not the entire buffer capacity
            let actual_samples = num_frames * spec.channels.count();
            samples.extend(&sample_buf.samples()[..actual_samples]);
        }

        if samples.is_empty() {
            return Err(TranscodeError::DecodingError(
                "No audio frames decoded".to_string(),
            ));
        }

        let duration_ms = if sample_rate > 0 && channels > 0 {
            (samples.len() as u64 * 1000) / (sample_rate as u64 * channels as u64)
        } else {
            0
        };

        Ok(DecodedAudio {
            samples,
            sample_rate,
            channels,
            duration_ms,
        })
    }

    /// 将 PCM f32 样本编码为 WAV
    fn encode_wav(&self, pcm: &DecodedAudio) -> Result<Vec<u8>, TranscodeError> {
        let bits_per_sample: u16 = 16;
        let num_channels = pcm.channels as u16;
        let sample_rate = pcm.sample_rate;
        let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
        let block_align = num_channels * (bits_per_sample / 8);

        // 转换 f32 样本到 i16
        let pcm_data: Vec<i16> = pcm
            .samples
            .iter()
            .map(|&s| {
                let clamped = s.clamp(-1.0, 1.0);
                (clamped * 32767.0) as i16
            })
            .collect();

        let data_size = pcm_data.len() * 2;
        let file_size = 36 + data_size;

        let mut wav = Vec::with_capacity(44 + data_size);

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(file_size as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());

        // PCM data
        for sample in pcm_data {
            wav.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(wav)
    }
}

impl Default for WavTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct DecodedAudio {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u8,
    duration_ms: u64,
}

#[async_trait]
impl AudioTranscoderPort for WavTranscoder {
    async fn mp3_to_wav(&self, mp3_data: &[u8]) -> Result<TranscodeResult, TranscodeError> {
        let original_size = mp3_data.len();

        let decoded = self.decode_mp3_to_pcm(mp3_data)?;
        let output = self.encode_wav(&decoded)?;

        tracing::debug!(
            original_size = original_size,
            wav_size = output.len(),
            duration_ms = decoded.duration_ms,
            "Transcoded MP3 to WAV"
        );

        Ok(TranscodeResult {
            transcoded_size: output.len(),
            audio_data: output,
            duration_ms: decoded.duration_ms,
            sample_rate: decoded.sample_rate,
            channels: decoded.channels,
            original_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let transcoder = WavTranscoder::new();
        let err = transcoder.mp3_to_wav(&[]).await.unwrap_err();
        assert!(matches!(err, TranscodeError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_garbage_input_fails_to_decode() {
        let transcoder = WavTranscoder::new();
        let err = transcoder.mp3_to_wav(b"definitely not mp3").await.unwrap_err();
        assert!(matches!(err, TranscodeError::DecodingError(_)));
    }

    #[test]
    fn test_encode_wav_produces_valid_container() {
        let transcoder = WavTranscoder::new();
        let pcm = DecodedAudio {
            samples: vec![0.0; 16000],
            sample_rate: 16000,
            channels: 1,
            duration_ms: 1000,
        };

        let wav = transcoder.encode_wav(&pcm).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        // 16000 个 16 位样本 = 32000 字节数据 + 44 字节头
        assert_eq!(wav.len(), 44 + 32000);

        let sample_rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sample_rate, 16000);
        let channels = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(channels, 1);
    }

    #[test]
    fn test_encode_wav_clamps_out_of_range_samples() {
        let transcoder = WavTranscoder::new();
        let pcm = DecodedAudio {
            samples: vec![2.0, -2.0],
            sample_rate: 8000,
            channels: 1,
            duration_ms: 0,
        };

        let wav = transcoder.encode_wav(&pcm).unwrap();
        let first = i16::from_le_bytes([wav[44], wav[45]]);
        let second = i16::from_le_bytes([wav[46], wav[47]]);
        assert_eq!(first, 32767);
        assert_eq!(second, -32767);
    }
}
