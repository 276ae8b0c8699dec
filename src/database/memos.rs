//! Memo queries. Every per-record statement scopes on both the memo id
//! and the owning user id, so a memo belonging to someone else behaves
//! exactly like a memo that does not exist.

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Memo;

/// All memos owned by the user, most recently updated first.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Memo>, sqlx::Error> {
    sqlx::query_as::<_, Memo>(
        "SELECT id, title, content, user_id, created_at, updated_at
         FROM memos
         WHERE user_id = $1
         ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Memo, sqlx::Error> {
    sqlx::query_as::<_, Memo>(
        "INSERT INTO memos (user_id, title, content)
         VALUES ($1, $2, $3)
         RETURNING id, title, content, user_id, created_at, updated_at",
    )
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn find_owned(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Memo>, sqlx::Error> {
    sqlx::query_as::<_, Memo>(
        "SELECT id, title, content, user_id, created_at, updated_at
         FROM memos
         WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Overwrite title and content in one ownership-scoped statement,
/// refreshing `updated_at`. `None` means no memo with that id belongs to
/// the user.
pub async fn update_owned(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Option<Memo>, sqlx::Error> {
    sqlx::query_as::<_, Memo>(
        "UPDATE memos
         SET title = $3, content = $4, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING id, title, content, user_id, created_at, updated_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
}

/// Delete in one ownership-scoped statement. `false` means no memo with
/// that id belongs to the user.
pub async fn delete_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM memos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
