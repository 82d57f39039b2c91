//! Listing queries - the parameter set behind `GET /posts/` and the
//! predicate, ordering and paging derived from it.

mod filter;
mod page;
mod params;

pub use filter::{OrderField, PostFilter, SortOrder};
pub use page::{DEFAULT_PAGE_SIZE, Page, PageRequest};
pub use params::{ListParams, PostQuery};
