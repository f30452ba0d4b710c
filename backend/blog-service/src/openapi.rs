/// OpenAPI documentation for the blog service
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Service API",
        version = "0.1.0",
        description = "Blog content-management backend: CRUD for posts, images, and moderated comments, plus the administrative moderation workflow (approve, reject, trash, restore, reply, bulk operations, and moderation counters).",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "posts", description = "Post creation, retrieval, updates, and deletion"),
        (name = "images", description = "Supplementary image uploads and management"),
        (name = "comments", description = "Comment management and moderation workflow"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn title() -> &'static str {
        "Blog Service"
    }

    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
