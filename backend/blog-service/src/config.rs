/// Configuration management for blog-service
///
/// Loads configuration from environment variables with development defaults.
/// Production deployments must set CORS origins explicitly.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Object storage (S3-compatible) configuration
    pub storage: StorageConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Object storage configuration for uploaded images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding uploaded blog images
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Optional custom endpoint (MinIO and similar S3-compatible stores)
    pub endpoint: Option<String>,
    /// Public base URL used to build retrievable image URLs
    pub public_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BLOG_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/blog".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            storage: {
                let bucket =
                    std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "blog-images".to_string());
                let region =
                    std::env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string());
                let endpoint = std::env::var("STORAGE_ENDPOINT")
                    .ok()
                    .filter(|e| !e.trim().is_empty());
                let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com"));

                StorageConfig {
                    bucket,
                    region,
                    endpoint,
                    public_base_url,
                }
            },
        })
    }
}
