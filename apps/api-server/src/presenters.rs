//! Domain to response DTO mapping.

use quill_core::domain::PostWithAuthor;
use quill_core::query::Page;
use quill_shared::{Paginated, PostDetail, PostListItem};

use crate::links::PageLinks;

pub fn list_item(entry: &PostWithAuthor, links: &PageLinks) -> PostListItem {
    PostListItem {
        title: entry.post.title.clone(),
        published_at: entry.post.published_at,
        url: links.detail_url(&entry.post.slug),
    }
}

/// The detail view serves the stored sanitized HTML, never the markdown source.
pub fn detail(entry: PostWithAuthor) -> PostDetail {
    let author = entry.author_name();
    let post = entry.post;
    PostDetail {
        title: post.title,
        slug: post.slug,
        body: post.body_html,
        author,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn listing(page: &Page<PostWithAuthor>, links: &PageLinks) -> Paginated<PostListItem> {
    let current = page.request.page;
    Paginated {
        count: page.total,
        next: page.has_next().then(|| links.page_url(current + 1)),
        previous: page.has_previous().then(|| links.page_url(current - 1)),
        results: page.items.iter().map(|e| list_item(e, links)).collect(),
    }
}
