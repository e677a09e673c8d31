//! TTS HTTP Handlers - 合成端点

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{OutputVariant, SynthesizeSpeech};
use crate::domain::AudioArtifact;
use crate::infrastructure::http::dto::SynthesisRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 下载端点 - 转码为 WAV 后以附件形式返回
pub async fn download_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesisRequest>,
) -> Result<Response, ApiError> {
    let artifact = synthesize(&state, req, OutputVariant::Download).await?;
    Ok(audio_response(artifact, "attachment"))
}

/// 流式端点 - 返回引擎原始 MP3 字节，不转码
pub async fn stream_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesisRequest>,
) -> Result<Response, ApiError> {
    let artifact = synthesize(&state, req, OutputVariant::Stream).await?;
    Ok(audio_response(artifact, "inline"))
}

async fn synthesize(
    state: &AppState,
    req: SynthesisRequest,
    variant: OutputVariant,
) -> Result<AudioArtifact, ApiError> {
    let command = SynthesizeSpeech {
        text: req.text,
        voice: req.voice,
        rate: req.rate,
        volume: req.volume,
        variant,
    };

    let artifact = state.synthesize_handler.handle(command).await?;

    tracing::info!(
        media_type = artifact.media_type.as_str(),
        size = artifact.len(),
        "Speech synthesized"
    );

    Ok(artifact)
}

fn audio_response(artifact: AudioArtifact, disposition: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.media_type.as_str())
        .header(header::CONTENT_LENGTH, artifact.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "{}; filename={}",
                disposition,
                artifact.media_type.filename()
            ),
        )
        .body(Body::from(artifact.data))
        .unwrap()
}
