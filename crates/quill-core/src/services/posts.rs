//! Post lifecycle and public reads.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::content::{MAX_SLUG_LEN, slugify, validate_slug};
use crate::domain::{Post, PostStatus, PostWithAuthor};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthorRepository, PostRepository};
use crate::query::{Page, PageRequest, PostQuery};

/// Longest title accepted.
pub const MAX_TITLE_LEN: usize = 250;

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    /// Explicit slug; derived from the title when absent.
    pub slug: Option<String>,
    pub body: String,
    pub status: PostStatus,
}

/// Partial update of an existing post.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<PostStatus>,
}

/// Post service: every write goes through here so `body_html` and the
/// timestamps are refreshed on each save.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self { posts, authors }
    }

    /// Create a post. Fails with [`DomainError::Duplicate`] when the slug is taken.
    pub async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let title = validate_title(&new.title)?;
        validate_body(&new.body)?;
        let slug = match new.slug {
            Some(slug) => {
                validate_slug(&slug)?;
                slug
            }
            None => derive_slug(&title)?,
        };

        if self.authors.find_by_id(new.author_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "unknown author {}",
                new.author_id
            )));
        }
        if self.posts.find_by_slug(&slug).await?.is_some() {
            return Err(duplicate_slug(&slug));
        }

        let post = Post::new(new.author_id, title, slug, new.body, new.status, Utc::now());
        let saved = self.posts.save(post).await.map_err(|e| match e {
            RepoError::Constraint(_) => duplicate_slug_from(e),
            other => other.into(),
        })?;

        tracing::info!(slug = %saved.slug, status = %saved.status, "Post created");
        Ok(saved)
    }

    /// Apply changes to the post at `slug` and save it.
    pub async fn update(&self, slug: &str, changes: PostChanges) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(slug))?;
        let now = Utc::now();

        if let Some(title) = changes.title {
            post.title = validate_title(&title)?;
        }
        if let Some(body) = changes.body {
            validate_body(&body)?;
            post.body = body;
        }
        if let Some(status) = changes.status {
            post.set_status(status, now);
        }
        post.prepare_save(now);

        let saved = self.posts.save(post).await?;
        tracing::info!(slug = %saved.slug, status = %saved.status, "Post updated");
        Ok(saved)
    }

    /// A published post for public display. Unknown and unpublished slugs
    /// are indistinguishable to the caller.
    pub async fn published(&self, slug: &str) -> Result<PostWithAuthor, DomainError> {
        self.posts
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(slug))
    }

    /// One page of published posts matching `query`.
    pub async fn list_published(
        &self,
        query: &PostQuery,
        page_size: u64,
    ) -> Result<Page<PostWithAuthor>, DomainError> {
        let request = PageRequest::new(query.page, page_size);
        let (items, total) = self
            .posts
            .list_published(&query.filter, query.order, request)
            .await?;
        tracing::debug!(total, page = request.page, "Listed published posts");
        Page::new(items, total, request)
    }

    /// A slug derived from `title` that no post holds yet, suffixed `-2`, `-3`, ...
    /// on collision.
    pub async fn available_slug(&self, title: &str) -> Result<String, DomainError> {
        let base = derive_slug(title)?;
        let mut candidate = base.clone();
        let mut n = 2;
        while self.posts.find_by_slug(&candidate).await?.is_some() {
            let suffix = format!("-{n}");
            let keep = MAX_SLUG_LEN.saturating_sub(suffix.len()).min(base.len());
            candidate = format!("{}{suffix}", base[..keep].trim_end_matches('-'));
            n += 1;
        }
        Ok(candidate)
    }

    /// Remove every post.
    pub async fn clear(&self) -> Result<u64, DomainError> {
        let removed = self.posts.delete_all().await?;
        tracing::warn!(removed, "All posts removed");
        Ok(removed)
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_body(body: &str) -> Result<(), DomainError> {
    if body.trim().is_empty() {
        return Err(DomainError::Validation("body must not be empty".to_string()));
    }
    Ok(())
}

fn derive_slug(title: &str) -> Result<String, DomainError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(DomainError::Validation(format!(
            "cannot derive a slug from title '{title}'"
        )));
    }
    Ok(slug)
}

fn duplicate_slug(slug: &str) -> DomainError {
    DomainError::Duplicate(format!("a post with slug '{slug}' already exists"))
}

fn duplicate_slug_from(err: RepoError) -> DomainError {
    DomainError::Duplicate(format!("post slug already exists ({err})"))
}
