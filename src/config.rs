//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(또는 `.env` 파일)에서 서버 설정값을 읽어옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: Bearer 토큰 검증용 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소 (기본값 "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값 3000)
//! - `FASTS_SCOPE`: 세션 공개 범위, `owner` 또는 `all` (기본값 `owner`)
//! - `DB_MAX_CONNECTIONS`: 연결 풀 크기 (기본값 5)

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// 설정 로딩 에러
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set: {1}")]
    Missing(&'static str, env::VarError),
    #[error("FASTS_SCOPE must be `owner` or `all`, got `{0}`")]
    InvalidScope(String),
}

/// 단식 세션이 누구에게 보이는지 정합니다.
///
/// - `Owner`: 요청자 본인의 세션만 목록/조회/수정/삭제 가능.
///   다른 사용자의 세션 ID로 접근하면 404를 돌려줍니다.
/// - `All`: 인증된 사용자라면 모든 세션에 접근 가능.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FastScope {
    #[default]
    Owner,
    All,
}

impl FastScope {
    /// 목록 조회에 쓸 소유자 필터. `All`이면 필터 없음.
    pub fn owner_filter<'a>(&self, user_id: &'a str) -> Option<&'a str> {
        match self {
            FastScope::Owner => Some(user_id),
            FastScope::All => None,
        }
    }

    /// `owner`가 소유한 세션을 `user_id`가 볼 수 있는지 확인합니다.
    pub fn permits(&self, user_id: &str, owner: &str) -> bool {
        match self {
            FastScope::Owner => user_id == owner,
            FastScope::All => true,
        }
    }
}

impl FromStr for FastScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(FastScope::Owner),
            "all" => Ok(FastScope::All),
            other => Err(ConfigError::InvalidScope(other.to_string())),
        }
    }
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 한 번 읽어온 후 변경하지 않습니다.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub scope: FastScope,
    pub max_connections: u32,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수입니다.
    /// `PORT`, `DB_MAX_CONNECTIONS`는 파싱에 실패하면 기본값을 사용하지만,
    /// `FASTS_SCOPE`의 알 수 없는 값은 접근 범위를 바꾸는 설정이므로 에러로 처리합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|e| ConfigError::Missing("DATABASE_URL", e))?,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|e| ConfigError::Missing("JWT_SECRET", e))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            scope: match env::var("FASTS_SCOPE") {
                Ok(raw) => raw.parse()?,
                Err(_) => FastScope::default(),
            },
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
        })
    }
}
