//! In-memory author repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Author;
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BaseRepository};

/// In-memory author store. Data is lost on process restart.
pub struct InMemoryAuthorRepository {
    store: RwLock<HashMap<Uuid, Author>>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn snapshot(&self) -> HashMap<Uuid, Author> {
        self.store.read().await.clone()
    }
}

impl Default for InMemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Author, Uuid> for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, author: Author) -> Result<Author, RepoError> {
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|other| other.id != author.id && other.username == author.username)
        {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                author.username
            )));
        }
        store.insert(author.id, author.clone());
        Ok(author)
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
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|a| a.username == username).cloned())
    }
}
