use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Post;

/// Create a new post stamped with the current time.
pub async fn create_post(
    pool: &SqlitePool,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image_key: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, author_id, group_id, text, image_key, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, author_id, group_id, text, image_key, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(group_id)
    .bind(text)
    .bind(image_key)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(post)
}

pub async fn find_post_by_id(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_key, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Overwrite the mutable fields of a post. Author and creation timestamp
/// are never touched.
pub async fn update_post(
    pool: &SqlitePool,
    post_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image_key: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $1, group_id = $2, image_key = $3
        WHERE id = $4
        RETURNING id, author_id, group_id, text, image_key, created_at
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image_key)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Hard delete. Comments go with the post via the schema cascade.
pub async fn delete_post(pool: &SqlitePool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Global feed page, newest first, id as tie-break.
pub async fn list_page(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_key, created_at
        FROM posts
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn count_all(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}

pub async fn list_by_group(
    pool: &SqlitePool,
    group_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_key, created_at
        FROM posts
        WHERE group_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(group_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn count_by_group(pool: &SqlitePool, group_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await
}

pub async fn list_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, group_id, text, image_key, created_at
        FROM posts
        WHERE author_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn count_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// Posts authored by anyone the viewer follows. An explicit join against
/// the follows table, not a graph traversal.
pub async fn list_by_followed(
    pool: &SqlitePool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.author_id, p.group_id, p.text, p.image_key, p.created_at
        FROM posts p
        JOIN follows f ON f.followed_id = p.author_id
        WHERE f.follower_id = $1
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(follower_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn count_by_followed(
    pool: &SqlitePool,
    follower_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM posts p
        JOIN follows f ON f.followed_id = p.author_id
        WHERE f.follower_id = $1
        "#,
    )
    .bind(follower_id)
    .fetch_one(pool)
    .await
}
