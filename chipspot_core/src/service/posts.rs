use std::sync::Arc;

use bytes::Bytes;
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::{
    entity::prelude::*,
    ids::{PostId, UserId},
    media::{MediaError, MediaStore},
    service::sessions::{AuthError, Session},
};

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("image upload failed: {0}")]
    MediaUpload(MediaError),
}

/// The editable text fields of a post. All five are opaque to the core;
/// callers hand over whatever the form carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub description: String,
    pub crowd: String,
    pub chips: String,
    pub queue_time: String,
}

#[derive(Clone)]
pub struct PostsService {
    db: DatabaseConnection,
    media: Arc<dyn MediaStore>,
}

impl PostsService {
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    /// Create a new post owned by `owner`.
    ///
    /// The image is uploaded before anything is written; an upload
    /// failure aborts the whole operation so no partial post exists.
    pub async fn create(
        &self,
        owner: UserId,
        fields: PostFields,
        image: Option<Bytes>,
    ) -> Result<PostModel, PostsServiceError> {
        let image_url = match image {
            Some(bytes) => Some(
                self.media
                    .upload(bytes)
                    .await
                    .map_err(PostsServiceError::MediaUpload)?,
            ),
            None => None,
        };

        let created_at = chrono::Utc::now().to_rfc3339();

        let post = PostActiveModel {
            id: NotSet,
            user_id: Set(owner),
            title: Set(fields.title),
            description: Set(fields.description),
            image_url: Set(image_url),
            crowd: Set(fields.crowd),
            chips: Set(fields.chips),
            queue_time: Set(fields.queue_time),
            created_at: Set(created_at),
        };

        let result = Post::insert(post).exec_with_returning(&self.db).await?;

        Ok(result)
    }

    /// Get a specific post by ID
    pub async fn get(&self, post_id: PostId) -> Result<PostModel, PostsServiceError> {
        Post::find_by_id(post_id)
            .one(&self.db)
            .await?
            .ok_or(PostsServiceError::PostNotFound)
    }

    /// Replace a post's text fields (only by owner or administrator).
    ///
    /// A supplied image is uploaded and replaces the stored url; when no
    /// image is supplied the prior url is preserved, never nulled out.
    pub async fn update(
        &self,
        post_id: PostId,
        editor: &Session,
        fields: PostFields,
        image: Option<Bytes>,
    ) -> Result<PostModel, PostsServiceError> {
        let post = self.get(post_id).await?;

        match editor {
            Session::Administrator => {}
            Session::Member(user_id) if *user_id == post.user_id => {}
            Session::Member(_) => return Err(AuthError::Forbidden.into()),
            Session::Anonymous => return Err(AuthError::Unauthenticated.into()),
        }

        let image_url = match image {
            Some(bytes) => Some(
                self.media
                    .upload(bytes)
                    .await
                    .map_err(PostsServiceError::MediaUpload)?,
            ),
            None => None,
        };

        let mut post_active: PostActiveModel = post.into();

        post_active.title = Set(fields.title);
        post_active.description = Set(fields.description);
        post_active.crowd = Set(fields.crowd);
        post_active.chips = Set(fields.chips);
        post_active.queue_time = Set(fields.queue_time);

        if let Some(url) = image_url {
            post_active.image_url = Set(Some(url));
        }

        let updated = post_active.update(&self.db).await?;
        Ok(updated)
    }

    /// Delete a post. Authorization belongs to the call site: the
    /// moderation facade is the only caller today.
    pub async fn delete(&self, post_id: PostId) -> Result<(), PostsServiceError> {
        // Surface PostNotFound rather than a silent zero-row delete
        self.get(post_id).await?;

        Post::delete_by_id(post_id).exec(&self.db).await?;

        Ok(())
    }

    /// List posts owned by a member, newest first.
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<PostModel>, PostsServiceError> {
        let posts = Post::find()
            .filter(PostColumn::UserId.eq(owner))
            .order_by_desc(PostColumn::CreatedAt)
            .order_by_desc(PostColumn::Id) // Deterministic tie-break
            .all(&self.db)
            .await?;

        Ok(posts)
    }

    /// List every post, newest first. This ordering is authoritative for
    /// the assembled feed.
    pub async fn list_all(&self) -> Result<Vec<PostModel>, PostsServiceError> {
        let posts = Post::find()
            .order_by_desc(PostColumn::CreatedAt)
            .order_by_desc(PostColumn::Id)
            .all(&self.db)
            .await?;

        Ok(posts)
    }
}
