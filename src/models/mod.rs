//! # 데이터 모델 모듈
//!
//! - `fast`: 단식 세션 엔티티와 단식 시간 계산 규칙
//! - `user`: 세션 소유자(사용자) 행
//!
//! `pub use X::*;`로 재공개하여 `crate::models::FastSession`처럼 짧게 접근합니다.

pub mod fast;
pub mod user;

pub use fast::*;
pub use user::*;
