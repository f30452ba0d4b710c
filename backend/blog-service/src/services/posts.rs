/// Post service - post/image CRUD and the public detail view
use crate::db::{comment_repo, image_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostDetail, PostImage, PostSummary};
use sqlx::PgPool;
use uuid::Uuid;

/// An image ready to be attached to a post: its storage key and the
/// retrievable URL the storage layer handed back.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub file_key: String,
    pub url: String,
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post and, in the order supplied, one image row per
    /// supplementary image.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        featured_image: Option<&str>,
        published: bool,
        images: Vec<NewImage>,
    ) -> Result<PostDetail> {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Post title is required".into()));
        }
        if content.trim().is_empty() {
            return Err(AppError::Validation("Post content is required".into()));
        }

        let post =
            post_repo::create_post(&self.pool, title, content, featured_image, published).await?;

        let mut created = Vec::with_capacity(images.len());
        for (position, image) in images.into_iter().enumerate() {
            let row = image_repo::create_image(
                &self.pool,
                post.id,
                &image.file_key,
                &image.url,
                position as i32,
            )
            .await?;
            created.push(row);
        }

        tracing::info!(post_id = %post.id, images = created.len(), "post created");

        Ok(PostDetail {
            post,
            images: created,
            comments: Vec::new(),
        })
    }

    /// List posts as reduced projections, optionally filtered by published
    /// status, newest first.
    pub async fn list_posts(&self, published: Option<bool>) -> Result<Vec<PostSummary>> {
        let posts = post_repo::list_posts(&self.pool, published).await?;
        Ok(posts)
    }

    /// Public detail view: full content, images, and approved comments only.
    pub async fn get_post(&self, post_id: Uuid) -> Result<PostDetail> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

        let images = image_repo::get_post_images(&self.pool, post_id).await?;
        let comments = comment_repo::approved_for_post(&self.pool, post_id).await?;

        Ok(PostDetail {
            post,
            images,
            comments,
        })
    }

    /// Partial update; omitted fields are left unchanged. The featured image
    /// takes a two-level option: `Some(None)` clears it, outer `None` keeps
    /// the current value.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
        featured_image: Option<Option<&str>>,
        published: Option<bool>,
    ) -> Result<Post> {
        if let Some(t) = title {
            if t.trim().is_empty() {
                return Err(AppError::Validation("Post title must not be empty".into()));
            }
        }
        if let Some(c) = content {
            if c.trim().is_empty() {
                return Err(AppError::Validation("Post content must not be empty".into()));
            }
        }

        post_repo::update_post(&self.pool, post_id, title, content, featured_image, published)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))
    }

    /// Delete a post. Owned images and comments are removed by the database
    /// cascade.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        let deleted = post_repo::delete_post(&self.pool, post_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        tracing::info!(post_id = %post_id, "post deleted with cascading images and comments");
        Ok(())
    }

    /// Fail with NotFound unless the post exists.
    pub async fn require_post(&self, post_id: Uuid) -> Result<()> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }
        Ok(())
    }

    /// Attach already-stored images to an existing post, preserving the
    /// order received. Positions continue from the post's existing images so
    /// ordering stays stable across upload batches. Rejects an empty list
    /// before touching anything.
    pub async fn attach_images(
        &self,
        post_id: Uuid,
        images: Vec<NewImage>,
    ) -> Result<Vec<PostImage>> {
        if images.is_empty() {
            return Err(AppError::Validation("No images provided".into()));
        }
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        let base = image_repo::next_position(&self.pool, post_id).await?;

        let mut created = Vec::with_capacity(images.len());
        for (offset, image) in images.into_iter().enumerate() {
            let row = image_repo::create_image(
                &self.pool,
                post_id,
                &image.file_key,
                &image.url,
                base + offset as i32,
            )
            .await?;
            created.push(row);
        }

        Ok(created)
    }

    /// List image rows, optionally scoped to one post.
    pub async fn list_images(&self, post_id: Option<Uuid>) -> Result<Vec<PostImage>> {
        let images = image_repo::list_images(&self.pool, post_id).await?;
        Ok(images)
    }

    /// Get a single image row.
    pub async fn get_image(&self, image_id: Uuid) -> Result<PostImage> {
        image_repo::get_image_by_id(&self.pool, image_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Image {image_id} not found")))
    }

    /// Delete an image row.
    pub async fn delete_image(&self, image_id: Uuid) -> Result<()> {
        let deleted = image_repo::delete_image(&self.pool, image_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Image {image_id} not found")));
        }

        Ok(())
    }
}
