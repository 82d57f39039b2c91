use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, Post, PostWithAuthor};
use crate::error::RepoError;
use crate::query::{PageRequest, PostFilter, SortOrder};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError>;
}

/// Post repository.
///
/// `save` must reject a slug already held by another post with
/// [`RepoError::Constraint`] instead of overwriting it.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post by slug regardless of status.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Find a published post by slug, joined with its author.
    async fn find_published_by_slug(&self, slug: &str)
    -> Result<Option<PostWithAuthor>, RepoError>;

    /// Page through published posts matching `filter`.
    ///
    /// The returned `total` counts every match, not just this page.
    async fn list_published(
        &self,
        filter: &PostFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> Result<(Vec<PostWithAuthor>, u64), RepoError>;

    /// Remove every post. Returns the number removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}

