//! 요청 전처리: Bearer 토큰에서 요청자를 꺼내는 인증 추출기.

pub mod auth;
