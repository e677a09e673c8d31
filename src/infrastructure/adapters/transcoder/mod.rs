//! Audio Transcoder Adapters

mod fake_transcoder;
mod wav_transcoder;

pub use fake_transcoder::FakeTranscoder;
pub use wav_transcoder::WavTranscoder;
