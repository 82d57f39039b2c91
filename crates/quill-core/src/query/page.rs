use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of posts per listing page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Rows to skip. Saturates for page numbers far past any real listing.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of results together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Build a page, rejecting requests past the last page.
    ///
    /// The first page is always valid, even when there are no results.
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Result<Self, DomainError> {
        let page = Self {
            items,
            total,
            request,
        };
        if request.page > page.num_pages() {
            return Err(DomainError::NotFound {
                entity_type: "Page",
                key: request.page.to_string(),
            });
        }
        Ok(page)
    }

    pub fn num_pages(&self) -> u64 {
        self.total.div_ceil(self.request.page_size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.request.page < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.request.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}
