//! Application Commands

pub mod handlers;
mod speech_commands;

pub use speech_commands::{OutputVariant, SynthesizeSpeech};
