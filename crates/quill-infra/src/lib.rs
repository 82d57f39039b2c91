//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::{InMemoryAuthorRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnection, PostgresAuthorRepository, PostgresPostRepository};
