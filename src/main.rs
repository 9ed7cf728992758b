//! # 단식 세션 서버 진입점
//!
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 라우터 조립 후 HTTP 서버 시작

use std::str::FromStr;

use anyhow::Result;
use fasting_sessions::{build_router, config::Config, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트와 tower_http, axum을 debug 레벨로 출력
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fasting_sessions=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting fasting sessions server on {}:{} (scope: {:?})",
        config.host,
        config.port,
        config.scope
    );

    // owner 외래키의 CASCADE 삭제가 동작하려면 foreign_keys가 켜져 있어야 합니다.
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(pool, config.jwt_secret.clone(), config.scope);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
