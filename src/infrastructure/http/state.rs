//! Application State

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    AudioTranscoderPort, ListVoicesHandler, SpeechEnginePort, SynthesizeSpeechHandler,
    UserStorePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub engine: Arc<dyn SpeechEnginePort>,
    pub transcoder: Arc<dyn AudioTranscoderPort>,
    pub user_store: Arc<dyn UserStorePort>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        engine: Arc<dyn SpeechEnginePort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
        user_store: Arc<dyn UserStorePort>,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            synthesize_handler: SynthesizeSpeechHandler::new(
                engine.clone(),
                transcoder.clone(),
                temp_dir,
            ),
            list_voices_handler: ListVoicesHandler::new(engine.clone()),

            engine,
            transcoder,
            user_store,
        }
    }
}
