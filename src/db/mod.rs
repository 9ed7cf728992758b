//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! - `fasts`: 단식 세션 저장소 트레이트와 SQLite 구현
//! - `users`: 세션 소유자 조회 (외래키 대상)

pub mod fasts;
pub mod users;

pub use fasts::{FastRepository, SqliteFastRepository};
