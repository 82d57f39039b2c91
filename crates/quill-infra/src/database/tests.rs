use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait, Value};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BaseRepository, PostRepository};
use quill_core::query::{PageRequest, PostFilter, SortOrder};

use crate::database::entity::{author, post};
use crate::database::postgres_repo::{
    PostgresAuthorRepository, PostgresPostRepository, published_select,
};

fn author_model() -> author::Model {
    author::Model {
        id: Uuid::new_v4(),
        username: "jane_writer".to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Smith".to_owned(),
        email: "jane@example.com".to_owned(),
        created_at: Utc::now().into(),
    }
}

fn post_model(author_id: Uuid, slug: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        author_id,
        title: "Test Post".to_owned(),
        slug: slug.to_owned(),
        body: "# Hi".to_owned(),
        body_html: "<h1>Hi</h1>\n".to_owned(),
        status: post::Status::Published,
        published_at: Some(now.into()),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let author = author_model();
    let model = post_model(author.id, "test-post");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_find_published_by_slug_joins_author() {
    let author = author_model();
    let model = post_model(author.id, "hello");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(model, author)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let entry = repo.find_published_by_slug("hello").await.unwrap().unwrap();

    assert_eq!(entry.post.slug, "hello");
    assert_eq!(entry.author_name(), "Jane Smith");
}

#[tokio::test]
async fn test_find_published_by_slug_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<(post::Model, author::Model)>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_published_by_slug("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_published_pages() {
    let author = author_model();
    let first = post_model(author.id, "first");
    let second = post_model(author.id, "second");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(22)]])
        .append_query_results(vec![vec![(first, author.clone()), (second, author)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let (items, total) = repo
        .list_published(
            &PostFilter::default(),
            SortOrder::default(),
            PageRequest::new(2, 20),
        )
        .await
        .unwrap();

    assert_eq!(total, 22);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].post.slug, "first");
}

#[tokio::test]
async fn test_list_published_past_end_skips_fetch() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row(3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let (items, total) = repo
        .list_published(
            &PostFilter::default(),
            SortOrder::default(),
            PageRequest::new(2, 20),
        )
        .await
        .unwrap();

    assert_eq!(total, 3);
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_find_author_by_username() {
    let author = author_model();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![author.clone()]])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);
    let found = repo.find_by_username("jane_writer").await.unwrap().unwrap();
    assert_eq!(found.id, author.id);
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[test]
fn test_published_select_sql() {
    let filter = PostFilter {
        terms: PostFilter::search_terms("Django"),
        published_after: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        published_before: Some(Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()),
    };
    let sql = published_select(&filter)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."status" = 'published'"#), "{sql}");
    assert!(sql.contains(r#""posts"."published_at" > '2025-01-01"#), "{sql}");
    assert!(sql.contains(r#""posts"."published_at" < '2025-12-31"#), "{sql}");
    assert!(sql.contains(r#"LOWER("posts"."title") LIKE '%django%'"#), "{sql}");
    assert!(sql.contains(r#"LOWER("posts"."body") LIKE '%django%'"#), "{sql}");
    assert!(sql.contains(r#"LOWER("authors"."first_name")"#), "{sql}");
    assert!(sql.contains(r#"LOWER("authors"."last_name")"#), "{sql}");
    assert!(sql.contains(r#"TRIM("authors"."first_name") = ''"#), "{sql}");
    assert!(
        sql.contains(r#"LOWER("authors"."username") LIKE '%django%'"#),
        "{sql}"
    );
}

#[test]
fn test_published_select_without_filters() {
    let sql = published_select(&PostFilter::default())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."status" = 'published'"#), "{sql}");
    assert!(!sql.contains("LIKE"), "{sql}");
    assert!(!sql.contains("published_at\" >"), "{sql}");
}
