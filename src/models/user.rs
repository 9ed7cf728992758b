use serde::Serialize;

/// 세션 소유자. 계정 정보 자체는 호스팅 애플리케이션이 관리합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: String,
}
