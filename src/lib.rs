//! # 단식 세션 서비스
//!
//! 사용자의 단식 기록을 SQLite에 저장하고 `/fasts` 아래 CRUD API로 노출합니다.
//! 바이너리(`main.rs`)와 통합 테스트가 모두 `build_router()`로 같은 앱을 만듭니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use routes::AppState;

/// 전체 라우터를 조립합니다.
///
/// - `/fasts`, `/fasts/{id}` (+ 끝 슬래시 형태): 단식 세션 CRUD
/// - `/`: API 루트
/// - `/health`: 헬스체크
pub fn build_router(state: AppState) -> Router {
    // 개발 편의상 모든 출처를 허용합니다. 호스팅 앱 뒤에 둘 때는 프록시에서 제한합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::fasts_routes())
        .route("/", get(routes::api_root))
        .route("/health", get(routes::health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
