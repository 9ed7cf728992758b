use crate::error::AppError;
use crate::models::user::User;
use sqlx::SqlitePool;

pub async fn create_user(pool: &SqlitePool, id: &str, username: &str) -> Result<User, AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username)
        VALUES (?, ?)
        "#,
    )
    .bind(id)
    .bind(username)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

/// 단식 세션 생성 시 소유자(요청자)가 실제로 있는지 확인할 때 사용합니다.
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// 사용자를 삭제합니다. 그 사용자의 단식 세션은 `ON DELETE CASCADE`로 함께 지워집니다.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
