use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;
use crate::content::render_body;
use crate::error::DomainError;

/// Publication state of a post. Only `Published` posts are publicly visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub const ALL: [PostStatus; 3] = [Self::Draft, Self::Published, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown post status '{s}'")))
    }
}

/// Post entity - a blog post with its markdown source and rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    /// Markdown source as written by the author.
    pub body: String,
    /// Sanitized HTML rendered from `body` at the last save.
    pub body_html: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post, rendering its body.
    pub fn new(
        author_id: Uuid,
        title: String,
        slug: String,
        body: String,
        status: PostStatus,
        now: DateTime<Utc>,
    ) -> Self {
        let mut post = Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body,
            body_html: String::new(),
            status,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        post.prepare_save(now);
        post
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Move to a new status. Entering `Published` stamps `published_at`.
    pub fn set_status(&mut self, status: PostStatus, now: DateTime<Utc>) {
        if status == PostStatus::Published && self.status != PostStatus::Published {
            self.published_at = Some(now);
        }
        self.status = status;
    }

    /// Refresh derived fields before persisting.
    pub fn prepare_save(&mut self, now: DateTime<Utc>) {
        self.body_html = render_body(&self.body);
        if self.is_published() && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }
}

/// A post joined with its author, as read back for public display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}

impl PostWithAuthor {
    pub fn author_name(&self) -> String {
        self.author.display_name()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn draft(now: DateTime<Utc>) -> Post {
        Post::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            "hello".to_string(),
            "# Hello\n\n<script>x()</script>".to_string(),
            PostStatus::Draft,
            now,
        )
    }

    #[test]
    fn test_new_post_renders_body() {
        let post = draft(Utc::now());
        assert_eq!(post.body_html.trim_end(), "<h1>Hello</h1>");
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_new_published_post_is_stamped() {
        let now = Utc::now();
        let post = Post::new(
            Uuid::new_v4(),
            "t".to_string(),
            "t".to_string(),
            String::new(),
            PostStatus::Published,
            now,
        );
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn test_publish_transition_sets_timestamp_once() {
        let created = Utc::now();
        let mut post = draft(created);

        let first = created + Duration::minutes(5);
        post.set_status(PostStatus::Published, first);
        assert_eq!(post.published_at, Some(first));

        post.set_status(PostStatus::Published, first + Duration::minutes(5));
        assert_eq!(post.published_at, Some(first));

        post.set_status(PostStatus::Archived, first + Duration::minutes(10));
        assert_eq!(post.published_at, Some(first));
        assert!(!post.is_published());
    }

    #[test]
    fn test_prepare_save_rerenders_body() {
        let now = Utc::now();
        let mut post = draft(now);
        post.body = "*changed*".to_string();
        let later = now + Duration::seconds(1);
        post.prepare_save(later);
        assert_eq!(post.body_html, "<p><em>changed</em></p>\n");
        assert_eq!(post.updated_at, later);
        assert_eq!(post.created_at, now);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert_eq!(PostStatus::Archived.to_string(), "archived");
        assert!("deleted".parse::<PostStatus>().is_err());
    }
}
