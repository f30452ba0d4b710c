//! Integration Tests: Post and Image CRUD
//!
//! Coverage:
//! - Post creation with ordered supplementary images
//! - List projection and published filter
//! - Public detail view showing only approved comments
//! - Partial updates bumping `updated_at`
//! - Cascade delete of images and comments

mod common;

use blog_service::error::AppError;
use blog_service::services::{NewImage, PostService};
use common::{create_test_comment, create_test_image, create_test_post, setup_test_db};
use sqlx::Row;
use uuid::Uuid;

fn new_image(n: u32) -> NewImage {
    NewImage {
        file_key: format!("blog_images/img-{n}.png"),
        url: format!("https://cdn.example.com/blog_images/img-{n}.png"),
    }
}

#[tokio::test]
async fn create_post_attaches_supplementary_images_in_order() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let detail = service
        .create_post(
            "Hello world",
            "<p>Body</p>",
            Some("featured_images/cover.png"),
            false,
            vec![new_image(1), new_image(2), new_image(3)],
        )
        .await
        .expect("create failed");

    assert_eq!(detail.images.len(), 3);
    assert_eq!(detail.images[0].file_key, "blog_images/img-1.png");
    assert_eq!(detail.images[2].file_key, "blog_images/img-3.png");
    assert!(detail.comments.is_empty());
    assert!(!detail.post.published);
}

#[tokio::test]
async fn create_post_requires_title_and_content() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let err = service
        .create_post("  ", "<p>Body</p>", None, false, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .create_post("Title", "", None, false, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn list_posts_filters_by_published() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    service
        .create_post("Draft", "<p>d</p>", None, false, vec![])
        .await
        .expect("create failed");
    service
        .create_post("Live", "<p>l</p>", None, true, vec![])
        .await
        .expect("create failed");

    let published = service.list_posts(Some(true)).await.expect("list failed");
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].title, "Live");

    let drafts = service.list_posts(Some(false)).await.expect("list failed");
    assert_eq!(drafts.len(), 1);

    let everything = service.list_posts(None).await.expect("list failed");
    assert_eq!(everything.len(), 2);
}

#[tokio::test]
async fn detail_view_shows_only_approved_comments() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let post_id = create_test_post(&pool).await;
    create_test_comment(&pool, post_id, "approved").await;
    create_test_comment(&pool, post_id, "pending").await;
    create_test_comment(&pool, post_id, "trashed").await;
    create_test_image(&pool, post_id).await;

    let detail = service.get_post(post_id).await.expect("get failed");
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.images.len(), 1);

    let err = service.get_post(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_post_is_partial_and_bumps_updated_at() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let created = service
        .create_post("Original", "<p>Body</p>", None, false, vec![])
        .await
        .expect("create failed");

    let updated = service
        .update_post(created.post.id, Some("Renamed"), None, None, Some(true))
        .await
        .expect("update failed");

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.content, "<p>Body</p>");
    assert!(updated.published);
    assert_eq!(updated.created_at, created.post.created_at);
    assert!(updated.updated_at >= created.post.updated_at);

    let err = service
        .update_post(Uuid::new_v4(), Some("x"), None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_post_clears_featured_image_on_explicit_null() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let created = service
        .create_post("Post", "<p>Body</p>", Some("featured/cover.png"), false, vec![])
        .await
        .expect("create failed");

    // Omitting the field keeps the current value.
    let updated = service
        .update_post(created.post.id, Some("Renamed"), None, None, None)
        .await
        .expect("update failed");
    assert_eq!(updated.featured_image.as_deref(), Some("featured/cover.png"));

    // An explicit null clears it.
    let updated = service
        .update_post(created.post.id, None, None, Some(None), None)
        .await
        .expect("update failed");
    assert_eq!(updated.featured_image, None);

    // And a new value replaces it.
    let updated = service
        .update_post(created.post.id, None, None, Some(Some("featured/new.png")), None)
        .await
        .expect("update failed");
    assert_eq!(updated.featured_image.as_deref(), Some("featured/new.png"));
}

#[tokio::test]
async fn attach_images_keeps_order_across_batches() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let post_id = create_test_post(&pool).await;

    let first = service
        .attach_images(post_id, vec![new_image(1), new_image(2)])
        .await
        .expect("attach failed");
    let second = service
        .attach_images(post_id, vec![new_image(3)])
        .await
        .expect("attach failed");

    // Positions continue across batches instead of restarting at zero.
    assert_eq!(first[0].position, 0);
    assert_eq!(first[1].position, 1);
    assert_eq!(second[0].position, 2);

    let listed = service.list_images(Some(post_id)).await.expect("list failed");
    let keys: Vec<&str> = listed.iter().map(|i| i.file_key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "blog_images/img-1.png",
            "blog_images/img-2.png",
            "blog_images/img-3.png",
        ]
    );
}

#[tokio::test]
async fn deleting_a_post_cascades_to_images_and_comments() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let post_id = create_test_post(&pool).await;
    for status in ["pending", "approved", "trashed"] {
        create_test_comment(&pool, post_id, status).await;
    }
    create_test_image(&pool, post_id).await;
    create_test_image(&pool, post_id).await;

    service.delete_post(post_id).await.expect("delete failed");

    let comments: i64 = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .expect("count failed")
        .get("count");
    let images: i64 = sqlx::query("SELECT COUNT(*) AS count FROM post_images WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .expect("count failed")
        .get("count");

    assert_eq!(comments, 0);
    assert_eq!(images, 0);
}

#[tokio::test]
async fn attach_images_requires_files_and_an_existing_post() {
    let pool = setup_test_db().await.expect("db setup failed");
    let service = PostService::new(pool.clone());

    let post_id = create_test_post(&pool).await;

    let err = service.attach_images(post_id, vec![]).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .attach_images(Uuid::new_v4(), vec![new_image(1)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let created = service
        .attach_images(post_id, vec![new_image(1), new_image(2)])
        .await
        .expect("attach failed");
    assert_eq!(created.len(), 2);

    // Image rows are visible through the image resource.
    let listed = service.list_images(Some(post_id)).await.expect("list failed");
    assert_eq!(listed.len(), 2);

    service
        .delete_image(created[0].id)
        .await
        .expect("delete image failed");
    let listed = service.list_images(Some(post_id)).await.expect("list failed");
    assert_eq!(listed.len(), 1);
}
