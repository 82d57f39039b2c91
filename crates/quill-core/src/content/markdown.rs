//! Markdown rendering and HTML sanitization for post bodies.
//!
//! Post bodies are authored as markdown and stored alongside a pre-rendered
//! HTML copy. The HTML is produced in two steps:
//!
//! 1. [`to_html`] converts markdown with plain CommonMark rules (no extensions).
//!    Raw HTML written by the author is passed through untouched here.
//! 2. [`sanitize_html`] filters the result down to [`ALLOWED_TAGS`]. Tags
//!    outside the list are unwrapped (their text survives), `script` and
//!    `style` are removed along with their content, and only `href`/`title`
//!    are kept, on `a` elements only.
//!
//! Both steps are total: malformed input degrades to literal text and nothing
//! here returns an error. Output is deterministic for a given input.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{Options, Parser, html};

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "br",
    "strong",
    "em",
    "ul",
    "ol",
    "li",
    "a",
    "blockquote",
    "code",
    "pre",
];

/// Attributes kept on `a`; every other attribute on every tag is dropped.
const LINK_ATTRIBUTES: &[&str] = &["href", "title"];

/// Link schemes allowed in `href`. Relative links pass through.
const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Elements removed together with everything inside them.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(CONTENT_STRIPPED_TAGS.iter().copied().collect())
        .tag_attributes(HashMap::from([(
            "a",
            LINK_ATTRIBUTES.iter().copied().collect::<HashSet<_>>(),
        )]))
        .url_schemes(URL_SCHEMES.iter().copied().collect())
        .url_relative(UrlRelative::PassThrough)
        .link_rel(None)
        .strip_comments(true);
    builder
});

/// Convert markdown to HTML using CommonMark rules.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut output = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut output, parser);
    output
}

/// Filter HTML down to the allow-list.
pub fn sanitize_html(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}

/// Render a post body: markdown to HTML, then sanitize.
pub fn render_body(markdown: &str) -> String {
    sanitize_html(&to_html(markdown))
}
