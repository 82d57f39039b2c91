//! Persisting demo content through the post service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use quill_core::DomainError;
use quill_core::domain::{Author, PostStatus};
use quill_core::ports::{AuthorRepository, BaseRepository, PostRepository};
use quill_core::services::{NewPost, PostService};
use rand::Rng;

use crate::demo::{self, AUTHORS};

/// Counts reported after a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub authors_created: usize,
    pub published: usize,
    pub drafts: usize,
    pub cleared: u64,
}

pub struct Seeder {
    service: PostService,
    posts: Arc<dyn PostRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl Seeder {
    pub fn new(posts: Arc<dyn PostRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self {
            service: PostService::new(posts.clone(), authors.clone()),
            posts,
            authors,
        }
    }

    /// Look up the demo authors, creating any that are missing.
    async fn ensure_authors(&self, summary: &mut SeedSummary) -> Result<Vec<Author>, DomainError> {
        let mut authors = Vec::with_capacity(AUTHORS.len());
        for (username, email, first_name, last_name) in AUTHORS {
            let author = match self.authors.find_by_username(username).await? {
                Some(existing) => existing,
                None => {
                    let created = self
                        .authors
                        .save(Author::new(username, first_name, last_name, email))
                        .await?;
                    tracing::info!(username, "Created author");
                    summary.authors_created += 1;
                    created
                }
            };
            authors.push(author);
        }
        Ok(authors)
    }

    /// Create `count` posts, optionally removing existing posts first.
    pub async fn run(
        &self,
        count: usize,
        clear: bool,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Result<SeedSummary, DomainError> {
        let mut summary = SeedSummary::default();
        if clear {
            tracing::info!("Clearing existing posts...");
            summary.cleared = self.service.clear().await?;
        }

        let authors = self.ensure_authors(&mut summary).await?;

        for n in 1..=count {
            let demo = demo::generate(rng, now);
            let slug = self.service.available_slug(&demo.title).await?;
            let mut post = self
                .service
                .create(NewPost {
                    author_id: authors[demo.author].id,
                    title: demo.title,
                    slug: Some(slug),
                    body: demo.body,
                    status: demo.status,
                })
                .await?;

            // Backdate; the service stamps everything with the current time.
            post.created_at = demo.created_at;
            post.updated_at = demo.published_at.unwrap_or(demo.created_at);
            post.published_at = demo.published_at;
            self.posts.save(post).await?;

            match demo.status {
                PostStatus::Published => summary.published += 1,
                _ => summary.drafts += 1,
            }
            if n % 5 == 0 {
                tracing::info!("Created {} posts...", n);
            }
        }

        Ok(summary)
    }
}
