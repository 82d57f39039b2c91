use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Authors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Authors::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Authors::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Authors::FirstName)
                            .string_len(150)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Authors::LastName)
                            .string_len(150)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Authors::Email)
                            .string_len(254)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Authors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Title).string_len(250).not_null())
                    .col(
                        ColumnDef::new(Posts::Slug)
                            .string_len(250)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Posts::Body).text().not_null())
                    .col(ColumnDef::new(Posts::BodyHtml).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string_len(20)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Posts::PublishedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_author_id")
                            .from(Posts::Table, Posts::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters on status and sorts by publication time.
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_status_published_at")
                    .table(Posts::Table)
                    .col(Posts::Status)
                    .col(Posts::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_author_id")
                    .table(Posts::Table)
                    .col(Posts::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Authors {
    Table,
    Id,
    Username,
    FirstName,
    LastName,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    AuthorId,
    Title,
    Slug,
    Body,
    BodyHtml,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
