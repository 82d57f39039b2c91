//! In-memory post repository - used when no database is configured and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostWithAuthor};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_core::query::{PageRequest, PostFilter, SortOrder};

use super::InMemoryAuthorRepository;

/// In-memory post store evaluating listings with [`PostFilter::matches`].
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
    authors: Arc<InMemoryAuthorRepository>,
}

impl InMemoryPostRepository {
    pub fn new(authors: Arc<InMemoryAuthorRepository>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            authors,
        }
    }

    async fn joined(&self, posts: Vec<Post>) -> Vec<PostWithAuthor> {
        let authors = self.authors.snapshot().await;
        posts
            .into_iter()
            .filter_map(|post| {
                let Some(author) = authors.get(&post.author_id).cloned() else {
                    tracing::warn!(slug = %post.slug, "Skipping post without author");
                    return None;
                };
                Some(PostWithAuthor { post, author })
            })
            .collect()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|other| other.id != post.id && other.slug == post.slug)
        {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|p| p.slug == slug).cloned())
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithAuthor>, RepoError> {
        let Some(post) = self.find_by_slug(slug).await? else {
            return Ok(None);
        };
        if !post.is_published() {
            return Ok(None);
        }
        Ok(self.joined(vec![post]).await.pop())
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> Result<(Vec<PostWithAuthor>, u64), RepoError> {
        let posts: Vec<Post> = self.store.read().await.values().cloned().collect();
        let mut matching: Vec<PostWithAuthor> = self
            .joined(posts)
            .await
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect();
        matching.sort_by(|a, b| order.compare(a, b));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect();
        Ok((items, total))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let removed = store.len() as u64;
        store.clear();
        Ok(removed)
    }
}
