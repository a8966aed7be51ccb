use sea_orm_migration::{prelude::*, schema::*};

use super::m20260830_000001_create_posts_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .col(pk_auto(Comment::Id))
                    .col(big_integer(Comment::PostId))
                    .col(uuid(Comment::UserId))
                    .col(string(Comment::Content))
                    .col(timestamp(Comment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-comment-post_id")
                            .from(Comment::Table, Comment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on post_id for the batched thread lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_id")
                    .table(Comment::Table)
                    .col(Comment::PostId)
                    .to_owned(),
            )
            .await?;

        // Create index on created_at for thread ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_created_at")
                    .table(Comment::Table)
                    .col(Comment::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Comment {
    Table,
    Id,
    PostId,
    UserId,
    Content,
    CreatedAt,
}
