use sea_orm_migration::{prelude::*, schema::*};

use super::m20260830_000001_create_posts_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    // The composite primary key is load-bearing: it is the uniqueness
    // constraint that `add_like` relies on for insert-or-ignore.
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Like::Table)
                    .col(big_integer(Like::PostId))
                    .col(uuid(Like::UserId))
                    .primary_key(Index::create().col(Like::PostId).col(Like::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-like-post_id")
                            .from(Like::Table, Like::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_likes_user_id")
                    .table(Like::Table)
                    .col(Like::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Like::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Like {
    Table,
    PostId,
    UserId,
}
