//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AuthorRepository, PostRepository};
use quill_core::services::PostService;
use quill_infra::{InMemoryAuthorRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnection, PostgresAuthorRepository, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub page_size: u64,
    pub public_base_url: Option<String>,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (db, posts, authors): (
            Option<DatabaseConnection>,
            Arc<dyn PostRepository>,
            Arc<dyn AuthorRepository>,
        ) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnection::init(db_config).await {
                    Ok(connection) => {
                        let posts = Arc::new(PostgresPostRepository::new(connection.conn.clone()));
                        let authors =
                            Arc::new(PostgresAuthorRepository::new(connection.conn.clone()));
                        (Some(connection), posts, authors)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        let (posts, authors) = in_memory_repositories();
                        (None, posts, authors)
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                let (posts, authors) = in_memory_repositories();
                (None, posts, authors)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (posts, authors) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory_repositories()
        };

        tracing::info!(page_size = config.page_size, "Application state initialized");

        Self {
            posts: PostService::new(posts, authors),
            page_size: config.page_size,
            public_base_url: config.public_base_url.clone(),
            #[cfg(feature = "postgres")]
            db,
        }
    }

    /// State over explicit repositories, without a database handle.
    #[cfg(test)]
    pub fn with_repositories(
        posts: Arc<dyn PostRepository>,
        authors: Arc<dyn AuthorRepository>,
        page_size: u64,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            posts: PostService::new(posts, authors),
            page_size,
            public_base_url,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

/// Fresh, empty in-memory repositories sharing one author store.
pub fn in_memory_repositories() -> (Arc<dyn PostRepository>, Arc<dyn AuthorRepository>) {
    let authors = Arc::new(InMemoryAuthorRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new(authors.clone()));
    (posts, authors)
}
