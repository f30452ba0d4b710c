/// Blog Service Library
///
/// Blog content-management backend: posts, supplementary images, and
/// moderated comments with an administrative approval workflow.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts, images, comments
/// - `services`: Business logic layer (moderation state machine, post CRUD, storage)
/// - `db`: Database access layer and repositories
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
/// - `openapi`: OpenAPI document served alongside the API
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
