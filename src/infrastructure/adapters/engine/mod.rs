//! Speech Engine Adapters

mod edge_client;
mod fake_client;

pub use edge_client::{EdgeTtsClient, EdgeTtsClientConfig};
pub use fake_client::FakeSpeechEngine;
