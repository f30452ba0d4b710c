/// Comment handlers - HTTP endpoints for comments and moderation actions
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::ModerationStatus;
use crate::services::ModerationService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Request body for creating a comment
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post: Uuid,
    pub content: String,
}

/// Query filters for plain comment listings.
///
/// `approved=true` selects approved comments, `approved=false` pending ones.
/// Trashed comments only show up with `include_trashed=true`.
#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    pub post: Option<Uuid>,
    pub approved: Option<bool>,
    #[serde(default)]
    pub include_trashed: bool,
}

#[derive(Debug, Deserialize)]
pub struct PostScopeQuery {
    pub post: Option<Uuid>,
}

/// Request body for bulk moderation operations
#[derive(Debug, Deserialize)]
pub struct BulkCommentRequest {
    pub comment_ids: Vec<Uuid>,
}

/// Request body for setting or clearing the admin reply
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub reply: Option<String>,
}

/// Create a new comment (starts pending)
pub async fn create_comment(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let comment = service.create_comment(req.post, &req.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// List comments with optional post/approval filters
pub async fn list_comments(
    pool: web::Data<PgPool>,
    query: web::Query<ListCommentsQuery>,
) -> Result<HttpResponse> {
    let status = query.approved.map(|approved| {
        if approved {
            ModerationStatus::Approved
        } else {
            ModerationStatus::Pending
        }
    });

    let service = ModerationService::new((**pool).clone());
    let comments = service
        .list(query.post, status, query.include_trashed)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Get a single comment
pub async fn get_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let comment = service.get_comment(*comment_id).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Permanently delete a comment
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    service.delete(*comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Approve a comment; reports the post's new approved count
pub async fn approve_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let (comment, approved_count) = service.approve(*comment_id).await?;
    metrics::record_transition("approve");

    Ok(HttpResponse::Ok().json(json!({
        "status": "comment approved",
        "comment": comment,
        "approved_count": approved_count,
    })))
}

/// Move an approved comment back to pending
pub async fn reject_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let comment = service.reject(*comment_id).await?;
    metrics::record_transition("reject");

    Ok(HttpResponse::Ok().json(json!({
        "status": "comment rejected",
        "comment": comment,
    })))
}

/// Trash a comment
pub async fn trash_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let comment = service.trash(*comment_id).await?;
    metrics::record_transition("trash");

    Ok(HttpResponse::Ok().json(json!({
        "status": "comment trashed",
        "comment": comment,
    })))
}

/// Restore a trashed comment to pending
pub async fn restore_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let comment = service.restore(*comment_id).await?;
    metrics::record_transition("restore");

    Ok(HttpResponse::Ok().json(json!({
        "status": "comment restored",
        "comment": comment,
    })))
}

/// Set or clear the admin reply on a comment
pub async fn reply_to_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    req: web::Json<ReplyRequest>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let comment = service.reply(*comment_id, req.reply.as_deref()).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Approve multiple pending comments at once
pub async fn bulk_approve(
    pool: web::Data<PgPool>,
    req: web::Json<BulkCommentRequest>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let affected = service.bulk_approve(&req.comment_ids).await?;
    metrics::record_bulk_transition("approve", affected);

    Ok(HttpResponse::Ok().json(json!({
        "status": format!("{affected} comments approved"),
        "affected": affected,
    })))
}

/// Move multiple approved comments back to pending at once
pub async fn bulk_reject(
    pool: web::Data<PgPool>,
    req: web::Json<BulkCommentRequest>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let affected = service.bulk_reject(&req.comment_ids).await?;
    metrics::record_bulk_transition("reject", affected);

    Ok(HttpResponse::Ok().json(json!({
        "status": format!("{affected} comments rejected"),
        "affected": affected,
    })))
}

/// Moderation counters (all/pending/approved/trash), optionally per post
pub async fn comment_counts(
    pool: web::Data<PgPool>,
    query: web::Query<PostScopeQuery>,
) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let counts = service.counts(query.post).await?;

    Ok(HttpResponse::Ok().json(counts))
}

/// Count of comments awaiting moderation
pub async fn pending_count(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = ModerationService::new((**pool).clone());
    let count = service.pending_count().await?;

    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// All comments for a post, partitioned into approved and pending
pub async fn all_for_post(
    pool: web::Data<PgPool>,
    query: web::Query<PostScopeQuery>,
) -> Result<HttpResponse> {
    let post_id = query
        .post
        .ok_or_else(|| AppError::BadRequest("Post ID is required".into()))?;

    let service = ModerationService::new((**pool).clone());
    let partitioned = service.all_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(partitioned))
}

/// Approved comments for a post, newest first
pub async fn approved_for_post(
    pool: web::Data<PgPool>,
    query: web::Query<PostScopeQuery>,
) -> Result<HttpResponse> {
    let post_id = query
        .post
        .ok_or_else(|| AppError::BadRequest("Post ID is required".into()))?;

    let service = ModerationService::new((**pool).clone());
    let comments = service.approved_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}
