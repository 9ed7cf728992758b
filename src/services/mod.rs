//! 도메인 서비스. 현재는 단식 세션의 JSON 표현 변환만 있습니다.

pub mod representation;
