//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /tts             POST  合成并转码为 WAV（附件下载）
//! - /tts/stream      POST  合成并返回原始 MP3（内联）
//! - /voices          GET   列出可用音色
//! - /health          GET   健康检查
//! - /api/users       GET   列出用户 / POST 创建用户
//! - /api/users/{id}  GET   获取 / PUT 更新 / DELETE 删除用户
//! - /api/hello       GET   演示端点

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tts", post(handlers::download_speech))
        .route("/tts/stream", post(handlers::stream_speech))
        .route("/voices", get(handlers::list_voices))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
}

/// 演示 API 路由（用户 CRUD）
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/users/:user_id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/hello", get(handlers::hello))
}
