/// Post handlers - HTTP endpoints for post operations
use crate::error::{AppError, Result};
use crate::services::{NewImage, PostService, Storage};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    /// Storage keys of already-uploaded supplementary images, in order.
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Omitted keeps the current value; an explicit `null` clears it.
    #[serde(default, deserialize_with = "nullable_field")]
    pub featured_image: Option<Option<String>>,
    pub published: Option<bool>,
}

/// Wraps a present-but-possibly-null JSON field in an outer Some, so a
/// missing key (outer None) stays distinguishable from an explicit null.
fn nullable_field<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub published: Option<bool>,
}

/// Create a new post, with optional supplementary images
pub async fn create_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Storage>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let images = req
        .images
        .into_iter()
        .map(|key| {
            let url = storage.public_url(&key);
            NewImage {
                file_key: key,
                url,
            }
        })
        .collect();

    let service = PostService::new((**pool).clone());
    let detail = service
        .create_post(
            &req.title,
            &req.content,
            req.featured_image.as_deref(),
            req.published,
            images,
        )
        .await?;

    Ok(HttpResponse::Created().json(detail))
}

/// List posts (reduced projection, newest first)
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(query.published).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post with images and approved comments
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let detail = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// Update a post
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .update_post(
            *post_id,
            req.title.as_deref(),
            req.content.as_deref(),
            req.featured_image.as_ref().map(|f| f.as_deref()),
            req.published,
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post (cascades to its images and comments)
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Upload one or more images to a post (multipart).
/// Rejects the call when no files are supplied.
pub async fn upload_images(
    pool: web::Data<PgPool>,
    storage: web::Data<Storage>,
    post_id: web::Path<Uuid>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    // Reject unknown posts before any file reaches storage.
    service.require_post(*post_id).await?;

    let mut images: Vec<NewImage> = Vec::new();

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        // Skip non-file form fields.
        let Some(file_name) = file_name else {
            continue;
        };

        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| AppError::BadRequest(format!("Upload read error: {e}")))?;
            bytes.extend_from_slice(&data);
        }

        if bytes.is_empty() {
            return Err(AppError::Validation(format!("Uploaded file {file_name} is empty")));
        }

        let key = Storage::object_key(&file_name);
        let url = storage.upload(&key, &content_type, bytes).await?;

        images.push(NewImage {
            file_key: key,
            url,
        });
    }

    let created = service.attach_images(*post_id, images).await?;

    Ok(HttpResponse::Created().json(created))
}
