use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

use crate::{
    entity::prelude::PostModel,
    ids::{PostId, UserId},
    oracle::{IdentityOracle, OracleAccount, OracleError},
    service::posts::{PostFields, PostsService, PostsServiceError},
    service::sessions::{AuthError, Session},
};

#[derive(Debug, Error)]
pub enum ModerationServiceError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Posts(#[from] PostsServiceError),

    #[error("account operation failed: {0}")]
    Oracle(OracleError),
}

/// Everything the admin dashboard renders in one view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub accounts: Vec<OracleAccount>,
    pub posts: Vec<PostModel>,
}

/// Administrator-only operations layered over the post repository and
/// the identity oracle. Every method checks the session first.
#[derive(Clone)]
pub struct ModerationService {
    posts: PostsService,
    oracle: Arc<dyn IdentityOracle>,
}

impl ModerationService {
    pub fn new(posts: PostsService, oracle: Arc<dyn IdentityOracle>) -> Self {
        Self { posts, oracle }
    }

    pub async fn delete_any_post(
        &self,
        session: &Session,
        post_id: PostId,
    ) -> Result<(), ModerationServiceError> {
        session.require_administrator()?;

        self.posts.delete(post_id).await?;

        Ok(())
    }

    /// Same field and image semantics as a member edit; the ownership
    /// check falls away because the session is the administrator.
    pub async fn edit_any_post(
        &self,
        session: &Session,
        post_id: PostId,
        fields: PostFields,
        image: Option<Bytes>,
    ) -> Result<PostModel, ModerationServiceError> {
        session.require_administrator()?;

        let updated = self.posts.update(post_id, session, fields, image).await?;

        Ok(updated)
    }

    /// Remove a member account via the oracle. Posts, comments and likes
    /// owned by the account are left in place; see DESIGN.md for the
    /// open cascade question.
    pub async fn delete_account(
        &self,
        session: &Session,
        user_id: UserId,
    ) -> Result<(), ModerationServiceError> {
        session.require_administrator()?;

        self.oracle
            .delete_account(user_id)
            .await
            .map_err(ModerationServiceError::Oracle)?;

        Ok(())
    }

    /// The oracle's administrative account listing. Fail-open: a failing
    /// oracle yields an empty list so the dashboard still renders.
    pub async fn list_all_accounts(
        &self,
        session: &Session,
    ) -> Result<Vec<OracleAccount>, ModerationServiceError> {
        session.require_administrator()?;

        match self.oracle.list_accounts().await {
            Ok(accounts) => Ok(accounts),
            Err(error) => {
                warn!(%error, "account listing failed, rendering empty list");
                Ok(Vec::new())
            }
        }
    }

    pub async fn dashboard(
        &self,
        session: &Session,
    ) -> Result<Dashboard, ModerationServiceError> {
        session.require_administrator()?;

        let accounts = self.list_all_accounts(session).await?;
        let posts = self.posts.list_all().await?;

        Ok(Dashboard { accounts, posts })
    }
}
