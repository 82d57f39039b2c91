//! Application services built on the ports.

mod posts;

pub use posts::{MAX_TITLE_LEN, NewPost, PostChanges, PostService};
