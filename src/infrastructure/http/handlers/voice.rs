//! Voice HTTP Handlers - 音色目录端点

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{VoiceResponse, VoicesResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取可用音色列表
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VoicesResponse>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices).await?;

    let voices = voices
        .into_iter()
        .map(|v| VoiceResponse {
            display_name: v.display_name,
            short_name: v.short_name,
            gender: v.gender,
            locale: v.locale,
        })
        .collect();

    Ok(Json(VoicesResponse { voices }))
}
