//! Published post endpoints.
//!
//! ```text
//! GET /api/v1/posts/
//! GET /api/v1/posts/{slug}/
//! ```

use actix_web::{HttpRequest, HttpResponse, web};
use quill_core::query::{ListParams, PostQuery};
use quill_shared::{ErrorResponse, Paginated, PostDetail, PostListItem};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::links::PageLinks;
use crate::middleware::error::AppResult;
use crate::presenters;
use crate::state::AppState;

/// Listing query string.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostListQuery {
    /// Whitespace or comma separated terms. Every term must match the title,
    /// body, or author name.
    search: Option<String>,
    /// ISO 8601 timestamp; only posts published strictly after it.
    #[param(example = "2025-01-01T00:00:00Z")]
    published_after: Option<String>,
    /// ISO 8601 timestamp; only posts published strictly before it.
    published_before: Option<String>,
    /// `published_at`, `created_at` or `title`, prefixed with `-` for descending.
    #[param(example = "-published_at")]
    ordering: Option<String>,
    /// 1-based page number.
    page: Option<String>,
}

impl From<PostListQuery> for ListParams {
    fn from(query: PostListQuery) -> Self {
        ListParams {
            search: query.search,
            published_after: query.published_after,
            published_before: query.published_before,
            ordering: query.ordering,
            page: query.page,
        }
    }
}

/// List published posts.
#[utoipa::path(
    get,
    path = "/api/v1/posts/",
    params(PostListQuery),
    responses(
        (status = 200, description = "A page of published posts", body = Paginated<PostListItem>),
        (status = 400, description = "Malformed query parameter", body = ErrorResponse),
        (status = 404, description = "Page past the end of the listing", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn list_posts(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let params: ListParams = query.into_inner().into();
    let query = PostQuery::parse(&params)?;
    let page = state.posts.list_published(&query, state.page_size).await?;
    let links = PageLinks::from_request(&req, state.public_base_url.as_deref())?;

    Ok(HttpResponse::Ok().json(presenters::listing(&page, &links)))
}

/// Retrieve one published post by slug.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}/",
    params(
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "The post with its rendered body", body = PostDetail),
        (status = 404, description = "No published post has this slug", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_post(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let entry = state.posts.published(&slug).await?;
    Ok(HttpResponse::Ok().json(presenters::detail(entry)))
}
