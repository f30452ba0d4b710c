use crate::models::{Post, PostSummary};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    title: &str,
    content: &str,
    featured_image: Option<&str>,
    published: bool,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, content, featured_image, published)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, content, featured_image, published, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(featured_image)
    .bind(published)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, featured_image, published, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Check whether a post exists
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1) AS found")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("found"))
}

/// List posts as reduced projections, newest first.
/// Optionally filtered by published status.
pub async fn list_posts(
    pool: &PgPool,
    published: Option<bool>,
) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(
        r#"
        SELECT p.id, p.title, p.featured_image, p.published,
               (SELECT COUNT(*) FROM post_images i WHERE i.post_id = p.id) AS image_count,
               p.created_at, p.updated_at
        FROM posts p
        WHERE $1::boolean IS NULL OR p.published = $1
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(published)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Partially update a post; omitted fields keep their current value.
/// The featured image is nullable, so it gets an explicit set/keep flag
/// instead of COALESCE: `Some(None)` clears it, outer `None` keeps it.
/// Bumps `updated_at` on every call. Returns None when the post is absent.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
    featured_image: Option<Option<&str>>,
    published: Option<bool>,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            content = COALESCE($3, content),
            featured_image = CASE WHEN $4 THEN $5 ELSE featured_image END,
            published = COALESCE($6, published),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, title, content, featured_image, published, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(content)
    .bind(featured_image.is_some())
    .bind(featured_image.flatten())
    .bind(published)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Delete a post. Images and comments are removed by the FK cascade.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
