//! # 단식 세션 저장소
//!
//! 단식 세션의 조회/저장/삭제를 `FastRepository` 트레이트로 추상화하고,
//! SQLite 구현(`SqliteFastRepository`)을 제공합니다.
//!
//! 라우트 핸들러는 `Arc<dyn FastRepository>`만 알고 있으므로,
//! 단식 시간 계산 같은 도메인 규칙은 저장소와 무관하게 테스트할 수 있습니다.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::FastSession;

/// 단식 세션 저장소 인터페이스
#[async_trait]
pub trait FastRepository: Send + Sync {
    /// 세션 목록을 최신 시작 시각 순으로 조회합니다.
    /// `owner`가 주어지면 해당 사용자의 세션만 반환합니다.
    async fn list(&self, owner: Option<&str>) -> Result<Vec<FastSession>, AppError>;

    /// ID로 세션 하나를 조회합니다. 없으면 `Ok(None)`.
    async fn find(&self, id: &str) -> Result<Option<FastSession>, AppError>;

    /// 세션을 저장합니다.
    ///
    /// - `id`가 None이면 새 ID(UUIDv7)를 부여하고 INSERT
    /// - `id`가 있으면 UPDATE (행이 사라졌다면 `AppError::NotFound`)
    async fn save(&self, session: FastSession) -> Result<FastSession, AppError>;

    /// 세션을 삭제합니다. 삭제된 행이 있으면 true.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// SQLite 기반 저장소. `SqlitePool`은 내부적으로 Arc이므로 clone이 저렴합니다.
#[derive(Clone)]
pub struct SqliteFastRepository {
    pool: SqlitePool,
}

impl SqliteFastRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FastRepository for SqliteFastRepository {
    async fn list(&self, owner: Option<&str>) -> Result<Vec<FastSession>, AppError> {
        // ?1을 두 번 참조하므로 bind는 한 번이면 됩니다.
        let sessions = sqlx::query_as::<_, FastSession>(
            r#"
            SELECT id, owner, start_time, end_time, duration, note
            FROM fast_sessions
            WHERE ?1 IS NULL OR owner = ?1
            ORDER BY start_time DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn find(&self, id: &str) -> Result<Option<FastSession>, AppError> {
        let session = sqlx::query_as::<_, FastSession>(
            r#"
            SELECT id, owner, start_time, end_time, duration, note
            FROM fast_sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn save(&self, session: FastSession) -> Result<FastSession, AppError> {
        let id = match session.id.as_deref() {
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE fast_sessions
                    SET owner = ?, start_time = ?, end_time = ?, duration = ?, note = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&session.owner)
                .bind(session.start_time)
                .bind(session.end_time)
                .bind(session.duration)
                .bind(&session.note)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(constraint_error)?;

                // 조회와 저장 사이에 다른 요청이 삭제한 경우
                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound);
                }
                id.to_string()
            }
            None => {
                let id = uuid::Uuid::now_v7().to_string();
                sqlx::query(
                    r#"
                    INSERT INTO fast_sessions (id, owner, start_time, end_time, duration, note)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&id)
                .bind(&session.owner)
                .bind(session.start_time)
                .bind(session.end_time)
                .bind(session.duration)
                .bind(&session.note)
                .execute(&self.pool)
                .await
                .map_err(constraint_error)?;
                id
            }
        };

        self.find(&id)
            .await?
            .ok_or(AppError::Internal("Failed to retrieve saved fast session".to_string()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM fast_sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// 제약 조건 위반을 검증 에러로 바꿉니다. 그 밖의 에러는 저장소 장애로 남깁니다.
fn constraint_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_foreign_key_violation() {
            return AppError::validation("owner", "Invalid pk - object does not exist.");
        }
        if db_err.is_check_violation() {
            return AppError::validation(
                "note",
                "Ensure this field has no more than 255 characters.",
            );
        }
    }
    AppError::Database(err)
}
