//! OpenAPI documentation for the public API.

use quill_shared::{ErrorResponse, PostDetail, PostListItem};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill blog API",
        description = "Read-only access to published blog posts.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::handlers::posts::list_posts,
        crate::handlers::posts::get_post,
        crate::handlers::health::health_check,
    ),
    components(schemas(PostListItem, PostDetail, ErrorResponse)),
    tags(
        (name = "posts", description = "Published blog posts"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
