use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use super::{PostFilter, SortOrder};
use crate::error::DomainError;

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub published_after: Option<String>,
    pub published_before: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
}

/// Validated listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub filter: PostFilter,
    pub order: SortOrder,
    /// 1-based page number.
    pub page: u64,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            filter: PostFilter::default(),
            order: SortOrder::default(),
            page: 1,
        }
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

impl PostQuery {
    /// Validate raw parameters. Blank values count as absent.
    pub fn parse(params: &ListParams) -> Result<Self, DomainError> {
        let published_after = non_blank(&params.published_after)
            .map(|raw| parse_timestamp("published_after", raw))
            .transpose()?;
        let published_before = non_blank(&params.published_before)
            .map(|raw| parse_timestamp("published_before", raw))
            .transpose()?;
        let order = non_blank(&params.ordering)
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();
        let page = non_blank(&params.page)
            .map(parse_page)
            .transpose()?
            .unwrap_or(1);
        let terms = params
            .search
            .as_deref()
            .map(PostFilter::search_terms)
            .unwrap_or_default();

        Ok(Self {
            filter: PostFilter {
                terms,
                published_after,
                published_before,
            },
            order,
            page,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an ISO 8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(DomainError::invalid_query(
        field,
        "Enter a valid ISO 8601 date/time, e.g. 2025-09-12T10:00:00Z.",
    ))
}

fn parse_page(raw: &str) -> Result<u64, DomainError> {
    match raw.parse::<u64>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(DomainError::invalid_query(
            "page",
            "A page number must be a positive integer.",
        )),
    }
}
