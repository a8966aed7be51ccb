use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .col(pk_auto(Post::Id))
                    .col(uuid(Post::UserId))
                    .col(string(Post::Title))
                    .col(string(Post::Description))
                    .col(string_null(Post::ImageUrl))
                    // Free-form classification fields, stored verbatim
                    .col(string(Post::Crowd))
                    .col(string(Post::Chips))
                    .col(string(Post::QueueTime))
                    .col(timestamp(Post::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create index on user_id for profile listings
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_user_id")
                    .table(Post::Table)
                    .col(Post::UserId)
                    .to_owned(),
            )
            .await?;

        // Create index on created_at for feed ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_posts_created_at")
                    .table(Post::Table)
                    .col(Post::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    UserId,
    Title,
    Description,
    ImageUrl,
    Crowd,
    Chips,
    QueueTime,
    CreatedAt,
}
