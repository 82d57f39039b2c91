//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post model, the markdown render pipeline, listing queries and the
//! repository ports.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;
pub mod query;
pub mod services;

pub use error::{DomainError, RepoError};
