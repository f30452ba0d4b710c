/// Database access layer
///
/// Repository functions over the sqlx PostgreSQL pool. Each repository module
/// owns the SQL for one table; business rules live in `services`.
pub mod comment_repo;
pub mod image_repo;
pub mod post_repo;
