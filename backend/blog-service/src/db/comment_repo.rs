use crate::models::{Comment, CommentCounts, ModerationStatus};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new comment on a post. Fresh comments start pending.
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, content)
        VALUES ($1, $2)
        RETURNING id, post_id, content, reply, status, created_at
        "#,
    )
    .bind(post_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get a single comment by ID
pub async fn get_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, content, reply, status, created_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// List comments, newest first.
///
/// Optional filters: post scope and an exact status. Trashed comments are
/// excluded unless `include_trashed` is set or the status filter asks for
/// them explicitly.
pub async fn list_comments(
    pool: &PgPool,
    post_id: Option<Uuid>,
    status: Option<ModerationStatus>,
    include_trashed: bool,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, content, reply, status, created_at
        FROM comments
        WHERE ($1::uuid IS NULL OR post_id = $1)
          AND ($2::text IS NULL OR status = $2)
          AND ($3::boolean OR status <> 'trashed')
        ORDER BY created_at DESC
        "#,
    )
    .bind(post_id)
    .bind(status.map(|s| s.as_str()))
    .bind(include_trashed || status == Some(ModerationStatus::Trashed))
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Unconditionally set a comment's status. Returns the updated comment,
/// or None when the comment does not exist.
pub async fn set_status(
    pool: &PgPool,
    comment_id: Uuid,
    status: ModerationStatus,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET status = $2
        WHERE id = $1
        RETURNING id, post_id, content, reply, status, created_at
        "#,
    )
    .bind(comment_id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Set or clear the admin reply. Returns None when the comment is absent.
pub async fn set_reply(
    pool: &PgPool,
    comment_id: Uuid,
    reply: Option<&str>,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET reply = $2
        WHERE id = $1
        RETURNING id, post_id, content, reply, status, created_at
        "#,
    )
    .bind(comment_id)
    .bind(reply)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Permanently delete a comment
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Approve every listed comment that is currently pending.
///
/// Single conditional UPDATE so a concurrent reader sees either the pre- or
/// post-bulk state, never a partial set. Returns the number of rows changed.
pub async fn bulk_approve(pool: &PgPool, comment_ids: &[Uuid]) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET status = 'approved'
        WHERE id = ANY($1) AND status = 'pending'
        "#,
    )
    .bind(comment_ids)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Move every listed comment that is currently approved back to pending.
/// Same atomicity contract as `bulk_approve`.
pub async fn bulk_reject(pool: &PgPool, comment_ids: &[Uuid]) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET status = 'pending'
        WHERE id = ANY($1) AND status = 'approved'
        "#,
    )
    .bind(comment_ids)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Moderation counters, optionally scoped to one post.
/// `all` excludes trashed rows, so `all + trash` equals the row total.
pub async fn counts(pool: &PgPool, post_id: Option<Uuid>) -> Result<CommentCounts, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE status <> 'trashed') AS all_count,
            COUNT(*) FILTER (WHERE status = 'pending') AS pending_count,
            COUNT(*) FILTER (WHERE status = 'approved') AS approved_count,
            COUNT(*) FILTER (WHERE status = 'trashed') AS trash_count
        FROM comments
        WHERE $1::uuid IS NULL OR post_id = $1
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(CommentCounts {
        all: row.get::<i64, _>("all_count"),
        pending: row.get::<i64, _>("pending_count"),
        approved: row.get::<i64, _>("approved_count"),
        trash: row.get::<i64, _>("trash_count"),
    })
}

/// Global count of pending comments. Trashed comments are never pending,
/// so this is scoped to the non-trashed population by construction.
pub async fn pending_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE status = 'pending'")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Count approved comments for a post (public visibility count).
pub async fn count_approved_for_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM comments WHERE post_id = $1 AND status = 'approved'",
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Approved comments for a post, newest first (public detail view).
pub async fn approved_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, content, reply, status, created_at
        FROM comments
        WHERE post_id = $1 AND status = 'approved'
        ORDER BY created_at DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// All non-trashed comments for a post, newest first (moderation view).
pub async fn non_trashed_for_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, content, reply, status, created_at
        FROM comments
        WHERE post_id = $1 AND status <> 'trashed'
        ORDER BY created_at DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
