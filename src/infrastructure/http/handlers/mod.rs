//! HTTP Handlers

mod health;
mod tts;
mod user;
mod voice;

pub use health::*;
pub use tts::*;
pub use user::*;
pub use voice::*;
