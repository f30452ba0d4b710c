/// Business logic layer for blog-service
///
/// - Moderation service: the comment state machine, bulk operations, and
///   moderation queries
/// - Post service: post/image CRUD and the public detail view
/// - Storage: S3-compatible object storage for uploaded images
pub mod moderation;
pub mod posts;
pub mod storage;

pub use moderation::{ModerationAction, ModerationService};
pub use posts::{NewImage, PostService};
pub use storage::Storage;
