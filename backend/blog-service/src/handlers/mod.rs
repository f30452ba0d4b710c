/// HTTP handlers for blog endpoints
///
/// This module contains handlers for:
/// - Posts: Create, read, update, delete posts and their image uploads
/// - Images: Read and delete image rows
/// - Comments: Create, read, delete comments plus the moderation actions
pub mod comments;
pub mod images;
pub mod posts;

// Re-export handler functions at module level
pub use comments::{
    all_for_post, approve_comment, approved_for_post, bulk_approve, bulk_reject, comment_counts,
    create_comment, delete_comment, get_comment, list_comments, pending_count, reject_comment,
    reply_to_comment, restore_comment, trash_comment,
};
pub use images::{delete_image, get_image, list_images};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post, upload_images};
