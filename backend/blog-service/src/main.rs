use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use blog_service::handlers;
use blog_service::openapi::ApiDoc;
use blog_service::services::Storage;
use sqlx::postgres::PgPoolOptions;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "ready": true,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "error": format!("PostgreSQL connection failed: {}", e),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&*doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let db_pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    // Apply pending migrations on startup
    if let Err(e) = sqlx::migrate!("./migrations").run(&db_pool).await {
        tracing::error!("Database migration failed: {}", e);
        return Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
    }

    tracing::info!("Connected to database, migrations applied");

    // Initialize object storage for image uploads
    let storage = Storage::from_config(&config.storage)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
    });
    let storage_data = web::Data::new(storage);

    let server = HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .app_data(web::Data::new(openapi_doc.clone()))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), openapi_doc.clone()),
            )
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(storage_data.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/metrics", web::get().to(blog_service::metrics::serve_metrics))
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_posts))
                                    .route(web::post().to(handlers::create_post)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post))
                                    .route(web::put().to(handlers::update_post))
                                    .route(web::patch().to(handlers::update_post))
                                    .route(web::delete().to(handlers::delete_post)),
                            )
                            .route(
                                "/{post_id}/images",
                                web::post().to(handlers::upload_images),
                            ),
                    )
                    .service(
                        web::scope("/images")
                            .service(
                                web::resource("").route(web::get().to(handlers::list_images)),
                            )
                            .service(
                                web::resource("/{image_id}")
                                    .route(web::get().to(handlers::get_image))
                                    .route(web::delete().to(handlers::delete_image)),
                            ),
                    )
                    .service(
                        web::scope("/comments")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_comments))
                                    .route(web::post().to(handlers::create_comment)),
                            )
                            .route("/counts", web::get().to(handlers::comment_counts))
                            .route("/pending_count", web::get().to(handlers::pending_count))
                            .route("/all", web::get().to(handlers::all_for_post))
                            .route("/approved", web::get().to(handlers::approved_for_post))
                            .route("/bulk_approve", web::post().to(handlers::bulk_approve))
                            .route("/bulk_reject", web::post().to(handlers::bulk_reject))
                            .service(
                                web::resource("/{comment_id}")
                                    .route(web::get().to(handlers::get_comment))
                                    .route(web::delete().to(handlers::delete_comment)),
                            )
                            .route(
                                "/{comment_id}/approve",
                                web::post().to(handlers::approve_comment),
                            )
                            .route(
                                "/{comment_id}/reject",
                                web::post().to(handlers::reject_comment),
                            )
                            .route(
                                "/{comment_id}/trash",
                                web::post().to(handlers::trash_comment),
                            )
                            .route(
                                "/{comment_id}/restore",
                                web::post().to(handlers::restore_comment),
                            )
                            .route(
                                "/{comment_id}/reply",
                                web::post().to(handlers::reply_to_comment),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run();

    tracing::info!("HTTP server is running");
    server.await?;

    tracing::info!("Blog-service shutting down");
    Ok(())
}
