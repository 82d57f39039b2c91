use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::PostWithAuthor;
use crate::error::DomainError;

/// Predicate over published posts.
///
/// Repositories translate this into their own query language; [`PostFilter::matches`]
/// is the reference semantics they must agree with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Lowercased search terms. Every term must hit at least one searchable field.
    pub terms: Vec<String>,
    /// Exclusive lower bound on `published_at`.
    pub published_after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `published_at`.
    pub published_before: Option<DateTime<Utc>>,
}

impl PostFilter {
    /// Split free text into search terms on whitespace and commas.
    pub fn search_terms(search: &str) -> Vec<String> {
        search
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(|term| term.replace('\0', ""))
            .filter(|term| !term.is_empty())
            .map(|term| term.to_lowercase())
            .collect()
    }

    pub fn matches(&self, entry: &PostWithAuthor) -> bool {
        let post = &entry.post;
        if !post.is_published() {
            return false;
        }

        if self.published_after.is_some() || self.published_before.is_some() {
            let Some(published_at) = post.published_at else {
                return false;
            };
            if self.published_after.is_some_and(|after| published_at <= after) {
                return false;
            }
            if self.published_before.is_some_and(|before| published_at >= before) {
                return false;
            }
        }

        if self.terms.is_empty() {
            return true;
        }
        let author = &entry.author;
        let mut haystacks = vec![
            post.title.to_lowercase(),
            post.body.to_lowercase(),
            author.first_name.to_lowercase(),
            author.last_name.to_lowercase(),
        ];
        if author.first_name.trim().is_empty() && author.last_name.trim().is_empty() {
            haystacks.push(author.username.to_lowercase());
        }
        self.terms
            .iter()
            .all(|term| haystacks.iter().any(|field| field.contains(term.as_str())))
    }
}

/// Fields a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    PublishedAt,
    CreatedAt,
    Title,
}

impl OrderField {
    pub const ALL: [OrderField; 3] = [Self::PublishedAt, Self::CreatedAt, Self::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublishedAt => "published_at",
            Self::CreatedAt => "created_at",
            Self::Title => "title",
        }
    }
}

/// Requested ordering: a field and a direction. Ties always fall back to id, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: OrderField,
    pub descending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            field: OrderField::PublishedAt,
            descending: true,
        }
    }
}

impl SortOrder {
    /// Compare two entries the way the listing orders them.
    pub fn compare(&self, a: &PostWithAuthor, b: &PostWithAuthor) -> Ordering {
        let (a, b) = (&a.post, &b.post);
        let primary = match self.field {
            OrderField::PublishedAt => a.published_at.cmp(&b.published_at),
            OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
            OrderField::Title => a.title.cmp(&b.title),
        };
        let primary = if self.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| b.id.cmp(&a.id))
    }

    /// Render back to the `ordering` parameter form.
    pub fn as_param(&self) -> String {
        if self.descending {
            format!("-{}", self.field.as_str())
        } else {
            self.field.as_str().to_string()
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, s),
        };
        let field = OrderField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| {
                let allowed: Vec<&str> = OrderField::ALL.iter().map(|f| f.as_str()).collect();
                DomainError::invalid_query(
                    "ordering",
                    format!(
                        "Unknown ordering field '{name}'. Choose from: {}.",
                        allowed.join(", ")
                    ),
                )
            })?;
        Ok(Self { field, descending })
    }
}
