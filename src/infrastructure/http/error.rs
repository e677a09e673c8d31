//! HTTP Error Handling
//!
//! 应用层错误到传输层的显式映射：验证错误与通用错误分开处理，
//! 按变体穷举映射，不做字符串匹配

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ports::UserStoreError;
use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse::new(detail))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match &e {
            ApplicationError::ValidationError(_) => ApiError::BadRequest(e.to_string()),
            ApplicationError::SynthesisError(_) => ApiError::Internal(e.to_string()),
            ApplicationError::CatalogError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::NotFound(id) => {
                tracing::debug!(user_id = id, "User lookup failed");
                ApiError::NotFound("User not found".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let err: ApiError =
            ApplicationError::validation("Text cannot be empty").into();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "Text cannot be empty"));
    }

    #[test]
    fn test_synthesis_error_maps_to_internal() {
        let err: ApiError = ApplicationError::synthesis("engine down").into();
        assert!(
            matches!(err, ApiError::Internal(msg) if msg == "TTS conversion failed: engine down")
        );
    }

    #[test]
    fn test_user_not_found_detail_is_stable() {
        let err: ApiError = UserStoreError::NotFound(42).into();
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "User not found"));
    }
}
