use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Idempotent edge insert; returns true if a new row was created. The
/// unique (follower, followed) constraint makes duplicates impossible even
/// under concurrent requests.
pub async fn insert_edge(
    pool: &SqlitePool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO follows (id, follower_id, followed_id, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (follower_id, followed_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(follower_id)
    .bind(followed_id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Idempotent delete; returns true if a row was removed.
pub async fn delete_edge(
    pool: &SqlitePool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

pub async fn edge_exists(
    pool: &SqlitePool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM follows
            WHERE follower_id = $1 AND followed_id = $2
        )
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await?;

    Ok(exists != 0)
}

pub async fn count_edges(
    pool: &SqlitePool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND followed_id = $2",
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(pool)
    .await
}
