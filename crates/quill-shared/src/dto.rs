//! Data Transfer Objects - response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A post as it appears in the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostListItem {
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Absolute URL of the post's detail endpoint.
    #[schema(example = "http://localhost:8080/api/v1/posts/hello-world/")]
    pub url: String,
}

/// A single published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostDetail {
    pub title: String,
    pub slug: String,
    /// Sanitized HTML rendered from the markdown source.
    pub body: String,
    /// Author display name.
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page-number pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    /// Total number of matching items across all pages.
    pub count: u64,
    /// Absolute URL of the next page, if any.
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any.
    pub previous: Option<String>,
    pub results: Vec<T>,
}
