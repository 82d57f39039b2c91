//! Content processing - markdown rendering, sanitization and slugs.

mod markdown;
mod slug;

pub use markdown::{ALLOWED_TAGS, render_body, sanitize_html, to_html};
pub use slug::{MAX_SLUG_LEN, slugify, validate_slug};
