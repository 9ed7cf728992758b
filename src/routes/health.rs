//! # 헬스체크(Health Check) 및 API 루트 핸들러
//!
//! - `GET /health` → `{ "status": "ok", "database": "ok" }`
//! - `GET /` → `{ "fasts": "/fasts/" }` (등록된 컬렉션 목록)
//!
//! 두 엔드포인트 모두 인증 없이 호출할 수 있습니다.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::routes::fasts::AppState;

/// `GET /health`: 서버와 데이터베이스 상태를 확인합니다.
///
/// DB에 `SELECT 1`을 보내 응답이 없으면 503과 함께 `"degraded"`를 돌려줍니다.
/// 로드밸런서나 컨테이너 헬스체크가 이 상태 코드를 보고 판단합니다.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => {
            tracing::warn!("Health check database ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}

/// `GET /`: 이 서비스가 노출하는 컬렉션과 그 경로
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "fasts": "/fasts/"
    }))
}
