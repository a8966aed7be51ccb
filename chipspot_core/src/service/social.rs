use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::debug;

use crate::{
    entity::prelude::*,
    ids::{PostId, UserId},
};

#[derive(Debug, Error)]
pub enum SocialServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,

    #[error("comment content must not be empty")]
    EmptyContent,
}

#[derive(Clone)]
pub struct SocialService {
    db: DatabaseConnection,
}

impl SocialService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_post_exists(&self, post_id: PostId) -> Result<(), SocialServiceError> {
        let exists = Post::find_by_id(post_id).one(&self.db).await?.is_some();

        if !exists {
            return Err(SocialServiceError::PostNotFound);
        }

        Ok(())
    }

    /// Cast a like on a post. Idempotent: a repeated like from the same
    /// member is a silent no-op, enforced by the composite primary key
    /// with insert-or-ignore rather than a check-then-insert race.
    ///
    /// There is no `remove_like`; likes are permanent once cast.
    pub async fn add_like(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<(), SocialServiceError> {
        self.ensure_post_exists(post_id).await?;

        let like = LikeActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
        };

        let rows = Like::insert(like)
            .on_conflict(
                OnConflict::columns([LikeColumn::PostId, LikeColumn::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if rows == 0 {
            debug!(%post_id, %user_id, "duplicate like ignored");
        }

        Ok(())
    }

    /// Count likes for a batch of posts in one grouped query. Every
    /// requested id is present in the result; zero-liked posts map to 0.
    pub async fn count_likes(
        &self,
        post_ids: &[PostId],
    ) -> Result<HashMap<PostId, u64>, SocialServiceError> {
        let mut counts: HashMap<PostId, u64> =
            post_ids.iter().map(|id| (*id, 0)).collect();

        if post_ids.is_empty() {
            return Ok(counts);
        }

        let rows: Vec<(PostId, i64)> = Like::find()
            .select_only()
            .column(LikeColumn::PostId)
            .column_as(LikeColumn::UserId.count(), "likes")
            .filter(LikeColumn::PostId.is_in(post_ids.iter().copied()))
            .group_by(LikeColumn::PostId)
            .into_tuple()
            .all(&self.db)
            .await?;

        for (post_id, likes) in rows {
            counts.insert(post_id, likes.max(0) as u64);
        }

        Ok(counts)
    }

    /// Append a comment to a post's thread.
    pub async fn add_comment(
        &self,
        post_id: PostId,
        author: UserId,
        content: &str,
    ) -> Result<CommentModel, SocialServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(SocialServiceError::EmptyContent);
        }

        self.ensure_post_exists(post_id).await?;

        let created_at = chrono::Utc::now().to_rfc3339();

        let comment = CommentActiveModel {
            id: NotSet,
            post_id: Set(post_id),
            user_id: Set(author),
            content: Set(content.to_owned()),
            created_at: Set(created_at),
        };

        let result = Comment::insert(comment).exec_with_returning(&self.db).await?;

        Ok(result)
    }

    /// Fetch the comment threads for a batch of posts in one query, each
    /// thread newest first. Every requested id is present in the result;
    /// commentless posts map to an empty thread.
    pub async fn comments_for(
        &self,
        post_ids: &[PostId],
    ) -> Result<HashMap<PostId, Vec<CommentModel>>, SocialServiceError> {
        let mut threads: HashMap<PostId, Vec<CommentModel>> =
            post_ids.iter().map(|id| (*id, Vec::new())).collect();

        if post_ids.is_empty() {
            return Ok(threads);
        }

        let comments = Comment::find()
            .filter(CommentColumn::PostId.is_in(post_ids.iter().copied()))
            .order_by_desc(CommentColumn::CreatedAt)
            .order_by_desc(CommentColumn::Id)
            .all(&self.db)
            .await?;

        // Rows arrive newest-first; pushing preserves that per thread
        for comment in comments {
            threads.entry(comment.post_id).or_default().push(comment);
        }

        Ok(threads)
    }
}
