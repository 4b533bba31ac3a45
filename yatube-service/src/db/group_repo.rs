use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Group;

/// Create a group. Groups are an administrative concern; there is no
/// end-user HTTP flow behind this.
pub async fn create_group(
    pool: &SqlitePool,
    slug: &str,
    title: &str,
    description: &str,
) -> Result<Group, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        INSERT INTO groups (id, slug, title, description, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, slug, title, description, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(title)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(group)
}

pub async fn find_by_id(pool: &SqlitePool, group_id: Uuid) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, slug, title, description, created_at
        FROM groups
        WHERE id = $1
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
    let group = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, slug, title, description, created_at
        FROM groups
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

pub async fn list_groups(pool: &SqlitePool) -> Result<Vec<Group>, sqlx::Error> {
    let groups = sqlx::query_as::<_, Group>(
        r#"
        SELECT id, slug, title, description, created_at
        FROM groups
        ORDER BY title ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(groups)
}
