//! # 단식 세션(Fast) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 응답 |
//! |--------|------|--------|------|
//! | GET | /fasts | `list_fasts` | 200, 세션 배열 |
//! | POST | /fasts | `create_fast` | 201, 생성된 세션 |
//! | GET | /fasts/{id} | `retrieve_fast` | 200 / 404 |
//! | PUT | /fasts/{id} | `replace_fast` | 200 / 404 (start_time 필수) |
//! | PATCH | /fasts/{id} | `patch_fast` | 200 / 404 (부분 수정) |
//! | DELETE | /fasts/{id} | `destroy_fast` | 204 / 404 |
//!
//! 끝에 `/`가 붙은 경로(`/fasts/`, `/fasts/{id}/`)도 똑같이 동작합니다.
//!
//! ## 인증 가드
//! 모든 핸들러는 `Result<AuthUser, AuthError>`를 받아 첫 줄에서 `auth?`로 풉니다.
//! 토큰이 없거나 잘못되면 본문을 읽거나 저장소에 접근하기 전에 401로 끝납니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    config::FastScope,
    db::{users, FastRepository, SqliteFastRepository},
    error::AppError,
    middleware::auth::{AuthError, AuthUser},
    models::FastSession,
    services::representation::{from_wire, to_wire, Mode},
};

/// 애플리케이션 공유 상태
///
/// 모든 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (헬스체크에서 사용)
    pub pool: SqlitePool,
    /// 단식 세션 저장소
    pub fasts: Arc<dyn FastRepository>,
    /// Bearer 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 세션 공개 범위
    pub scope: FastScope,
}

impl AppState {
    /// SQLite 풀 위에 기본 저장소를 얹어 상태를 만듭니다.
    pub fn new(pool: SqlitePool, jwt_secret: impl Into<String>, scope: FastScope) -> Self {
        Self {
            fasts: Arc::new(SqliteFastRepository::new(pool.clone())),
            pool,
            jwt_secret: jwt_secret.into(),
            scope,
        }
    }
}

/// `/fasts` 컬렉션의 라우트 테이블
pub fn fasts_routes() -> Router<AppState> {
    let collection: MethodRouter<AppState> = get(list_fasts).post(create_fast);
    let member: MethodRouter<AppState> = get(retrieve_fast)
        .put(replace_fast)
        .patch(patch_fast)
        .delete(destroy_fast);

    Router::new()
        .route("/fasts", collection.clone())
        .route("/fasts/", collection)
        .route("/fasts/{id}", member.clone())
        .route("/fasts/{id}/", member)
}

fn representation(session: &FastSession) -> Value {
    Value::Object(to_wire(session))
}

/// 세션을 불러오되, 없거나 요청자에게 보이지 않으면 404로 처리합니다.
async fn load_visible(
    state: &AppState,
    principal: &AuthUser,
    id: &str,
) -> Result<FastSession, AppError> {
    let session = state.fasts.find(id).await?.ok_or(AppError::NotFound)?;
    if !state.scope.permits(&principal.user_id, &session.owner) {
        return Err(AppError::NotFound);
    }
    Ok(session)
}

/// `GET /fasts`: 요청자에게 보이는 세션 목록
pub async fn list_fasts(
    State(state): State<AppState>,
    auth: Result<AuthUser, AuthError>,
) -> Result<Json<Vec<Value>>, AppError> {
    let principal = auth?;

    let sessions = state
        .fasts
        .list(state.scope.owner_filter(&principal.user_id))
        .await?;
    Ok(Json(sessions.iter().map(representation).collect()))
}

/// `GET /fasts/{id}`: 단일 세션 조회
pub async fn retrieve_fast(
    State(state): State<AppState>,
    auth: Result<AuthUser, AuthError>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let principal = auth?;

    let session = load_visible(&state, &principal, &id).await?;
    Ok(Json(representation(&session)))
}

/// `POST /fasts`: 새 세션 생성
///
/// `owner`를 생략하면 요청자가 소유자가 됩니다.
/// 다른 사용자를 소유자로 지정하거나, 요청자의 사용자 행이 없으면 검증 에러입니다.
/// `duration`은 보내더라도 무시되고, 종료 시각이 있으면 서버가 계산합니다.
pub async fn create_fast(
    State(state): State<AppState>,
    auth: Result<AuthUser, AuthError>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let principal = auth?;
    let Json(body) = body?;

    let fields = from_wire(&body, Mode::Full).map_err(AppError::Validation)?;
    if let Some(owner) = fields.owner.as_deref() {
        if owner != principal.user_id {
            return Err(AppError::validation(
                "owner",
                "Fast sessions can only be recorded for the authenticated user.",
            ));
        }
    }
    if users::find_by_id(&state.pool, &principal.user_id).await?.is_none() {
        return Err(AppError::validation(
            "owner",
            "Invalid pk - object does not exist.",
        ));
    }

    let session = FastSession::from_fields(principal.user_id.clone(), fields)?
        .persist(state.fasts.as_ref())
        .await?;

    tracing::info!(
        fast_id = ?session.id,
        owner = %session.owner,
        duration = ?session.duration,
        "Created fast session"
    );
    Ok((StatusCode::CREATED, Json(representation(&session))))
}

/// `PUT /fasts/{id}`: 전체 수정 (start_time 필수)
pub async fn replace_fast(
    State(state): State<AppState>,
    auth: Result<AuthUser, AuthError>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    update_fast(state, auth, id, body, Mode::Full).await
}

/// `PATCH /fasts/{id}`: 부분 수정
pub async fn patch_fast(
    State(state): State<AppState>,
    auth: Result<AuthUser, AuthError>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    update_fast(state, auth, id, body, Mode::Partial).await
}

/// PUT/PATCH 공통 처리
///
/// 1. 인증 가드
/// 2. 세션 로드 (없으면 본문 검증보다 먼저 404)
/// 3. 본문 검증 후 보낸 필드만 적용
/// 4. 단식 시간 재계산 후 저장
///
/// `end_time`을 생략하거나 null로 지우면 `duration`은 이전 값을 유지합니다.
async fn update_fast(
    state: AppState,
    auth: Result<AuthUser, AuthError>,
    id: String,
    body: Result<Json<Value>, JsonRejection>,
    mode: Mode,
) -> Result<Json<Value>, AppError> {
    let principal = auth?;

    let mut session = load_visible(&state, &principal, &id).await?;

    let Json(body) = body?;
    let fields = from_wire(&body, mode).map_err(AppError::Validation)?;
    if let Some(owner) = fields.owner.as_deref() {
        if owner != session.owner {
            return Err(AppError::validation(
                "owner",
                "The owner of a fast session cannot be changed.",
            ));
        }
    }

    session.apply(fields);
    let session = session.persist(state.fasts.as_ref()).await?;

    tracing::info!(
        fast_id = %id,
        owner = %session.owner,
        duration = ?session.duration,
        "Updated fast session"
    );
    Ok(Json(representation(&session)))
}

/// `DELETE /fasts/{id}`: 세션 삭제
///
/// 같은 ID를 두 번 삭제하면 두 번째는 404입니다.
pub async fn destroy_fast(
    State(state): State<AppState>,
    auth: Result<AuthUser, AuthError>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let principal = auth?;

    let session = load_visible(&state, &principal, &id).await?;
    if !state.fasts.delete(&id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(fast_id = %id, owner = %session.owner, "Deleted fast session");
    Ok(StatusCode::NO_CONTENT)
}
