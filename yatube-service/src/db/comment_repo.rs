use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Comment;

pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, author_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, post_id, author_id, text, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Comments for a post, newest first.
pub async fn list_by_post(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author_id, text, created_at
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

pub async fn count_by_post(pool: &SqlitePool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
