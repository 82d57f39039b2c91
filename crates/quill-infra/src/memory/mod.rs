//! In-memory repositories - fallback when no database is configured.

mod authors;
mod posts;

pub use authors::InMemoryAuthorRepository;
pub use posts::InMemoryPostRepository;
