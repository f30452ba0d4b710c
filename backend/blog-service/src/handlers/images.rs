/// Image handlers - HTTP endpoints for image rows
///
/// Uploads happen through `POST /posts/{id}/images`; this module covers the
/// read and delete side of the image resource.
use crate::error::Result;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListImagesQuery {
    pub post: Option<Uuid>,
}

/// List images, optionally filtered by post
pub async fn list_images(
    pool: web::Data<PgPool>,
    query: web::Query<ListImagesQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let images = service.list_images(query.post).await?;

    Ok(HttpResponse::Ok().json(images))
}

/// Get a single image
pub async fn get_image(pool: web::Data<PgPool>, image_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let image = service.get_image(*image_id).await?;

    Ok(HttpResponse::Ok().json(image))
}

/// Delete an image row
pub async fn delete_image(
    pool: web::Data<PgPool>,
    image_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_image(*image_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
