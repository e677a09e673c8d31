//! User HTTP Handlers - 演示用 CRUD 端点

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::{User, UserPatch};
use crate::infrastructure::http::dto::{CreateUserRequest, MessageResponse, UpdateUserRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
    pub timestamp: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 获取所有用户
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<UserResponse>> {
    let users = state
        .user_store
        .list()
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Json(users)
}

/// 按 id 获取用户
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_store.get(user_id)?;
    Ok(Json(user.into()))
}

/// 创建用户
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Json<UserResponse> {
    let user = state.user_store.create(req.name, req.email);
    Json(user.into())
}

/// 更新用户（只更新提供的字段）
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let patch = UserPatch {
        name: req.name,
        email: req.email,
    };
    let user = state.user_store.update(user_id, patch)?;
    Ok(Json(user.into()))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = state.user_store.delete(user_id)?;
    Ok(Json(MessageResponse {
        message: format!("User {} deleted successfully", user.name),
    }))
}

/// Hello endpoint
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from the TTS API!".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
