pub mod entity;
pub mod ids;
pub mod models;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::error::CoreError;
use crate::media::MediaStore;
use crate::oracle::IdentityOracle;
use crate::service::feed::FeedService;
use crate::service::moderation::ModerationService;
use crate::service::posts::PostsService;
use crate::service::sessions::SessionsService;
use crate::service::social::SocialService;

pub mod media;
pub mod oracle;

pub mod service;

pub mod error;

pub mod config;

pub mod test_utils;

/// Main runtime handle for chipspot.
///
/// The identity oracle and the media store are external collaborators;
/// callers hand in whichever implementations they run against.
pub struct ChipspotCore {
    pub config: config::ChipspotConfig,

    pub db: DatabaseConnection,

    /// Login, registration and session guards.
    pub sessions: SessionsService,

    /// Post CRUD with ownership enforcement.
    pub posts: PostsService,

    /// Likes and comments.
    pub social: SocialService,

    /// The aggregated, ordered post view.
    pub feed: FeedService,

    /// Administrator-only surface.
    pub moderation: ModerationService,
}

impl ChipspotCore {
    pub async fn start(
        oracle: Arc<dyn IdentityOracle>,
        media: Arc<dyn MediaStore>,
    ) -> Result<Self, CoreError> {
        let config = config::get_or_init().await?;

        // DB + migrations
        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        let sessions = SessionsService::new(oracle.clone(), config.admin().cloned());
        let posts = PostsService::new(db.clone(), media);
        let social = SocialService::new(db.clone());
        let feed = FeedService::new(posts.clone(), social.clone());
        let moderation = ModerationService::new(posts.clone(), oracle);

        Ok(Self {
            config,
            db,
            sessions,
            posts,
            social,
            feed,
            moderation,
        })
    }

    pub async fn shutdown(self) -> Result<(), CoreError> {
        self.db.close().await?;
        Ok(())
    }
}

pub mod prelude {
    pub use super::entity;
    pub use super::ids;
    pub use super::models;

    pub use super::service;

    pub use super::error;

    pub use super::config;

    pub use super::media;
    pub use super::oracle;
}
