//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use quill_core::domain::{Author, Post, PostWithAuthor};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, PostRepository};
use quill_core::query::{OrderField, PageRequest, PostFilter, SortOrder};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity, Status};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Author>, RepoError> {
        tracing::debug!(username, "Finding author by username");

        let result = AuthorEntity::find()
            .filter(author::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Status.eq(Status::Published))
            .find_also_related(AuthorEntity)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        row.map(join_row).transpose()
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> Result<(Vec<PostWithAuthor>, u64), RepoError> {
        let paginator = ordered(published_select(filter), order)
            .find_also_related(AuthorEntity)
            .paginate(&self.db, page.page_size);

        let total = paginator.num_items().await.map_err(query_err)?;
        if total <= page.offset() {
            return Ok((Vec::new(), total));
        }

        let rows = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(query_err)?;
        let items = rows
            .into_iter()
            .map(join_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }
}

/// Published posts matching `filter`, unordered.
pub(crate) fn published_select(filter: &PostFilter) -> Select<PostEntity> {
    let mut condition = Condition::all().add(post::Column::Status.eq(Status::Published));

    if let Some(after) = filter.published_after {
        condition = condition.add(post::Column::PublishedAt.gt(after));
    }
    if let Some(before) = filter.published_before {
        condition = condition.add(post::Column::PublishedAt.lt(before));
    }

    for term in &filter.terms {
        let pattern = format!("%{}%", escape_like(term));
        condition = condition.add(
            Condition::any()
                .add(lower_like((PostEntity, post::Column::Title), &pattern))
                .add(lower_like((PostEntity, post::Column::Body), &pattern))
                .add(lower_like((AuthorEntity, author::Column::FirstName), &pattern))
                .add(lower_like((AuthorEntity, author::Column::LastName), &pattern))
                .add(
                    Condition::all()
                        .add(is_blank((AuthorEntity, author::Column::FirstName)))
                        .add(is_blank((AuthorEntity, author::Column::LastName)))
                        .add(lower_like((AuthorEntity, author::Column::Username), &pattern)),
                ),
        );
    }

    PostEntity::find().filter(condition)
}

fn ordered(select: Select<PostEntity>, order: SortOrder) -> Select<PostEntity> {
    let column = match order.field {
        OrderField::PublishedAt => post::Column::PublishedAt,
        OrderField::CreatedAt => post::Column::CreatedAt,
        OrderField::Title => post::Column::Title,
    };
    let direction = if order.descending {
        Order::Desc
    } else {
        Order::Asc
    };
    select
        .order_by(column, direction)
        .order_by(post::Column::Id, Order::Desc)
}

/// `LOWER(column) LIKE pattern`; terms are already lowercased.
fn lower_like<C>(column: C, pattern: &str) -> SimpleExpr
where
    C: sea_orm::sea_query::IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Authors with no name are shown by username, so search falls back to it.
fn is_blank<C>(column: C) -> SimpleExpr
where
    C: sea_orm::sea_query::IntoColumnRef,
{
    Expr::expr(Func::cust(Alias::new("TRIM")).arg(Expr::col(column))).eq("")
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn join_row((post, author): (post::Model, Option<author::Model>)) -> Result<PostWithAuthor, RepoError> {
    let author = author.ok_or_else(|| {
        RepoError::Query(format!("post '{}' has no author row", post.slug))
    })?;
    Ok(PostWithAuthor {
        post: post.into(),
        author: author.into(),
    })
}
