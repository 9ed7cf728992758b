//! # 라우트 핸들러 모듈
//!
//! - `fasts`: 단식 세션 CRUD 핸들러와 공유 상태(`AppState`)
//! - `health`: 헬스체크와 API 루트

pub mod fasts;
pub mod health;

pub use fasts::{fasts_routes, AppState};
pub use health::*;
