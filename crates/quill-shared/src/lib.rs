//! # Quill Shared
//!
//! Wire types of the public API: the post list and detail shapes, the
//! pagination envelope and the error body.

pub mod dto;
pub mod response;

pub use dto::{Paginated, PostDetail, PostListItem};
pub use response::ErrorResponse;
