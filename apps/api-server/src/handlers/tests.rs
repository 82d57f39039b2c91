//! Endpoint tests over in-memory repositories.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{DateTime, TimeZone, Utc};
use quill_core::domain::{Author, PostStatus};
use quill_core::ports::{BaseRepository, PostRepository};
use quill_core::services::NewPost;
use serde_json::Value;

use super::configure_routes;
use crate::state::{AppState, in_memory_repositories};

struct Harness {
    state: AppState,
    posts: Arc<dyn PostRepository>,
    author: Author,
}

async fn harness(page_size: u64) -> Harness {
    let (posts, authors) = in_memory_repositories();
    let author = authors
        .save(Author::new("jane_writer", "Jane", "Smith", "jane@example.com"))
        .await
        .unwrap();
    Harness {
        state: AppState::with_repositories(posts.clone(), authors, page_size, None),
        posts,
        author,
    }
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
}

impl Harness {
    async fn post(&self, title: &str, body: &str, status: PostStatus, day: u32) {
        let mut post = self
            .state
            .posts
            .create(NewPost {
                author_id: self.author.id,
                title: title.to_string(),
                slug: None,
                body: body.to_string(),
                status,
            })
            .await
            .unwrap();
        if status == PostStatus::Published {
            post.published_at = Some(at(day));
            self.posts.save(post).await.unwrap();
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("host", "blog.test"))
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        let body = test::read_body(res).await;
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

fn titles(json: &Value) -> Vec<&str> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_list_shows_only_published_newest_first() {
    let h = harness(20).await;
    h.post("Older", "first", PostStatus::Published, 1).await;
    h.post("Newer", "second", PostStatus::Published, 2).await;
    h.post("Hidden draft", "wip", PostStatus::Draft, 3).await;
    h.post("Retired", "old", PostStatus::Archived, 4).await;

    let (status, json) = h.get("/api/v1/posts/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["next"], Value::Null);
    assert_eq!(json["previous"], Value::Null);
    assert_eq!(titles(&json), vec!["Newer", "Older"]);

    let first = &json["results"][0];
    assert_eq!(first["url"], "http://blog.test/api/v1/posts/newer/");
    assert_eq!(first["published_at"], "2025-03-02T12:00:00Z");
    assert!(first.get("body").is_none());
}

#[actix_web::test]
async fn test_list_without_trailing_slash() {
    let h = harness(20).await;
    h.post("Only", "x", PostStatus::Published, 1).await;
    let (status, json) = h.get("/api/v1/posts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
}

#[actix_web::test]
async fn test_empty_listing_is_a_valid_first_page() {
    let h = harness(20).await;
    let (status, json) = h.get("/api/v1/posts/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(json["results"], serde_json::json!([]));
}

#[actix_web::test]
async fn test_pagination_links() {
    let h = harness(2).await;
    for day in 1..=5 {
        h.post(&format!("Post {day}"), "body", PostStatus::Published, day)
            .await;
    }

    let (status, json) = h.get("/api/v1/posts/?page=2&search=post").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 5);
    assert_eq!(titles(&json), vec!["Post 3", "Post 2"]);
    assert_eq!(
        json["next"],
        "http://blog.test/api/v1/posts/?page=3&search=post"
    );
    assert_eq!(json["previous"], "http://blog.test/api/v1/posts/?search=post");

    let (_, last) = h.get("/api/v1/posts/?page=3").await;
    assert_eq!(titles(&last), vec!["Post 1"]);
    assert_eq!(last["next"], Value::Null);
}

#[actix_web::test]
async fn test_page_past_end_is_not_found() {
    let h = harness(2).await;
    h.post("Lonely", "body", PostStatus::Published, 1).await;

    let (status, json) = h.get("/api/v1/posts/?page=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Invalid page.");
}

#[actix_web::test]
async fn test_max_page_number_is_not_found() {
    let h = harness(20).await;
    h.post("Lonely", "body", PostStatus::Published, 1).await;

    let (status, json) = h.get("/api/v1/posts/?page=18446744073709551615").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Invalid page.");
}

#[actix_web::test]
async fn test_malformed_parameters_are_bad_requests() {
    let h = harness(20).await;
    for (uri, field) in [
        ("/api/v1/posts/?page=abc", "page"),
        ("/api/v1/posts/?page=0", "page"),
        ("/api/v1/posts/?ordering=body", "ordering"),
        ("/api/v1/posts/?published_after=yesterday", "published_after"),
        ("/api/v1/posts/?published_before=2025-13-01", "published_before"),
    ] {
        let (status, json) = h.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["errors"][field].is_array(), "{uri}: {json}");
    }
}

#[actix_web::test]
async fn test_date_range_is_exclusive() {
    let h = harness(20).await;
    h.post("T1", "x", PostStatus::Published, 1).await;
    h.post("T2", "x", PostStatus::Published, 2).await;
    h.post("T3", "x", PostStatus::Published, 3).await;

    let (status, json) = h
        .get("/api/v1/posts/?published_after=2025-03-01T12:00:00Z&published_before=2025-03-03T12:00:00Z")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&json), vec!["T2"]);
}

#[actix_web::test]
async fn test_search_and_ordering() {
    let h = harness(20).await;
    h.post("Zebra crossings", "About rust and roads.", PostStatus::Published, 1)
        .await;
    h.post("Apple pie", "Baking, not RUST.", PostStatus::Published, 2)
        .await;
    h.post("Middle", "Nothing relevant.", PostStatus::Published, 3)
        .await;

    let (_, json) = h.get("/api/v1/posts/?search=rust&ordering=title").await;
    assert_eq!(titles(&json), vec!["Apple pie", "Zebra crossings"]);

    let (_, json) = h.get("/api/v1/posts/?search=rust&ordering=-title").await;
    assert_eq!(titles(&json), vec!["Zebra crossings", "Apple pie"]);

    let (_, json) = h.get("/api/v1/posts/?search=rust,roads").await;
    assert_eq!(titles(&json), vec!["Zebra crossings"]);

    let (_, json) = h.get("/api/v1/posts/?search=smith&ordering=published_at").await;
    assert_eq!(titles(&json), vec!["Zebra crossings", "Apple pie", "Middle"]);

    let (status, json) = h.get("/api/v1/posts/?search=xyzabcnonexistentterm123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
}

#[actix_web::test]
async fn test_detail_returns_sanitized_html() {
    let h = harness(20).await;
    h.post(
        "Safe Post",
        "# Heading\n\n<script>alert('x')</script>\n\n[link](javascript:alert(1)) and *text*",
        PostStatus::Published,
        1,
    )
    .await;

    let (status, json) = h.get("/api/v1/posts/safe-post/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["slug"], "safe-post");
    assert_eq!(json["author"], "Jane Smith");
    let body = json["body"].as_str().unwrap();
    assert!(body.contains("<h1>Heading</h1>"));
    assert!(body.contains("<em>text</em>"));
    assert!(!body.contains("script"));
    assert!(!body.contains("javascript:"));

    let (status, _) = h.get("/api/v1/posts/safe-post").await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_unpublished_and_unknown_detail_look_the_same() {
    let h = harness(20).await;
    h.post("Secret draft", "wip", PostStatus::Draft, 1).await;

    let (draft_status, draft) = h.get("/api/v1/posts/secret-draft/").await;
    let (missing_status, missing) = h.get("/api/v1/posts/no-such-post/").await;
    assert_eq!(draft_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(draft, missing);
}

#[actix_web::test]
async fn test_health_without_database() {
    let h = harness(20).await;
    let (status, json) = h.get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "in-memory");
}

#[actix_web::test]
async fn test_openapi_document_served() {
    let h = harness(20).await;
    let (status, json) = h.get("/api/v1/schema/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/api/v1/posts/"].is_object());
    assert!(json["paths"]["/api/v1/posts/{slug}/"].is_object());
}

#[actix_web::test]
async fn test_swagger_ui_served() {
    let h = harness(20).await;
    let (status, _) = h.get("/api/v1/docs/").await;
    assert_eq!(status, StatusCode::OK);
}
