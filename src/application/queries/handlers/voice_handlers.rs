//! Voice Query Handlers - 音色目录查询
//!
//! 每次调用都重新查询引擎端目录，不做缓存

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ProviderVoice, SpeechEnginePort};
use crate::application::queries::ListVoices;

/// 音色目录条目
#[derive(Debug, Clone)]
pub struct VoiceDescriptor {
    pub display_name: String,
    pub short_name: String,
    pub gender: String,
    pub locale: String,
}

impl From<ProviderVoice> for VoiceDescriptor {
    fn from(voice: ProviderVoice) -> Self {
        Self {
            display_name: voice.display_name,
            short_name: voice.short_name,
            gender: voice.gender,
            locale: voice.locale,
        }
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    engine: Arc<dyn SpeechEnginePort>,
}

impl ListVoicesHandler {
    pub fn new(engine: Arc<dyn SpeechEnginePort>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceDescriptor>, ApplicationError> {
        let voices = self
            .engine
            .list_voices()
            .await
            .map_err(ApplicationError::catalog)?;

        tracing::debug!(count = voices.len(), "Voice catalog fetched");

        Ok(voices.into_iter().map(VoiceDescriptor::from).collect())
    }
}
