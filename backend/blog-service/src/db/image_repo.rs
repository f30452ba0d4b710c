use crate::models::PostImage;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create an image row owned by a post
pub async fn create_image(
    pool: &PgPool,
    post_id: Uuid,
    file_key: &str,
    url: &str,
    position: i32,
) -> Result<PostImage, sqlx::Error> {
    let image = sqlx::query_as::<_, PostImage>(
        r#"
        INSERT INTO post_images (post_id, file_key, url, position)
        VALUES ($1, $2, $3, $4)
        RETURNING id, post_id, file_key, url, position, created_at
        "#,
    )
    .bind(post_id)
    .bind(file_key)
    .bind(url)
    .bind(position)
    .fetch_one(pool)
    .await?;

    Ok(image)
}

/// Get a single image by ID
pub async fn get_image_by_id(
    pool: &PgPool,
    image_id: Uuid,
) -> Result<Option<PostImage>, sqlx::Error> {
    let image = sqlx::query_as::<_, PostImage>(
        r#"
        SELECT id, post_id, file_key, url, position, created_at
        FROM post_images
        WHERE id = $1
        "#,
    )
    .bind(image_id)
    .fetch_optional(pool)
    .await?;

    Ok(image)
}

/// Next free position for a post's images. Positions grow monotonically
/// across upload batches, so upload order never depends on timestamps.
pub async fn next_position(pool: &PgPool, post_id: Uuid) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COALESCE(MAX(position) + 1, 0) AS next FROM post_images WHERE post_id = $1",
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i32, _>("next"))
}

/// List images, optionally scoped to one post, in upload order.
pub async fn list_images(
    pool: &PgPool,
    post_id: Option<Uuid>,
) -> Result<Vec<PostImage>, sqlx::Error> {
    let images = sqlx::query_as::<_, PostImage>(
        r#"
        SELECT id, post_id, file_key, url, position, created_at
        FROM post_images
        WHERE $1::uuid IS NULL OR post_id = $1
        ORDER BY position ASC, created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(images)
}

/// Get all images for a post in upload order
pub async fn get_post_images(pool: &PgPool, post_id: Uuid) -> Result<Vec<PostImage>, sqlx::Error> {
    list_images(pool, Some(post_id)).await
}

/// Delete an image row. The stored object is left to storage lifecycle rules.
pub async fn delete_image(pool: &PgPool, image_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM post_images WHERE id = $1")
        .bind(image_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
