//! # 에러 처리 모듈
//!
//! 서비스에서 발생할 수 있는 모든 에러를 `AppError` 하나로 모읍니다.
//! 핸들러가 `Result<T, AppError>`를 반환하면 Axum이 `IntoResponse`를 호출해
//! 아래 형태의 JSON 에러 응답을 만듭니다.
//!
//! ```text
//! { "error": { "code": "validation_error", "message": "...", "fields": { "note": ["..."] } } }
//! ```
//!
//! `fields`는 검증 에러(400)에만 포함됩니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::middleware::auth::AuthError;
use crate::services::representation::FieldErrors;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 각 variant는 HTTP 상태 코드와 에러 코드 문자열로 변환됩니다.
/// 저장소 장애(`Database`)는 재시도하지 않고 그대로 5xx로 돌려줍니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 세션이 없거나 요청자에게 보이지 않음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 요청 본문을 JSON으로 해석할 수 없음 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 필드 단위 검증 실패 (HTTP 400)
    /// 필드 이름 → 메시지 목록 맵을 그대로 응답에 싣습니다.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// 인증 실패 (HTTP 401)
    /// #[from]: 인증 가드에서 `?`로 바로 전파할 수 있게 합니다.
    #[error(transparent)]
    Unauthenticated(#[from] AuthError),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 필드 하나에 대한 검증 에러를 만듭니다.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }
}

// Json 추출기의 거부(파싱 실패, Content-Type 누락 등)를 우리 에러 형식으로 바꿉니다.
// 핸들러는 `Result<Json<Value>, JsonRejection>`을 받아 인증 가드 다음에 `?`로 풉니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 내용을 로그에만 남기고
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Resource not found".to_string(),
                None,
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg, None)
            }
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "One or more fields are invalid".to_string(),
                Some(fields),
            ),
            AppError::Unauthenticated(e) => {
                (StatusCode::UNAUTHORIZED, e.code(), e.to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match fields {
            Some(fields) => json!({
                "error": {
                    "code": code,
                    "message": message,
                    "fields": fields
                }
            }),
            None => json!({
                "error": {
                    "code": code,
                    "message": message
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}
