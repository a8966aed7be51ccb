use thiserror::Error;

use crate::{
    entity::prelude::{CommentModel, PostModel},
    ids::PostId,
    service::posts::{PostsService, PostsServiceError},
    service::social::{SocialService, SocialServiceError},
};

#[derive(Debug, Error)]
pub enum FeedServiceError {
    #[error(transparent)]
    Posts(#[from] PostsServiceError),

    #[error(transparent)]
    Social(#[from] SocialServiceError),
}

/// One post as the feed presents it, with its aggregated social
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub post: PostModel,
    pub like_count: u64,
    pub comments: Vec<CommentModel>,
}

#[derive(Clone)]
pub struct FeedService {
    posts: PostsService,
    social: SocialService,
}

impl FeedService {
    pub fn new(posts: PostsService, social: SocialService) -> Self {
        Self { posts, social }
    }

    /// Assemble the full feed: every post, newest first, each carrying
    /// its like count and comment thread.
    ///
    /// Aggregation is batched by id set — one likes query and one
    /// comments query however large the feed is. The post ordering from
    /// `list_all` is authoritative; assembly never re-sorts.
    ///
    /// Pagination is not part of the current contract; a future cursor
    /// slots in between the listing and the aggregation without touching
    /// either.
    pub async fn assemble_feed(&self) -> Result<Vec<FeedEntry>, FeedServiceError> {
        let posts = self.posts.list_all().await?;

        let post_ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();

        let mut like_counts = self.social.count_likes(&post_ids).await?;
        let mut comment_threads = self.social.comments_for(&post_ids).await?;

        let feed = posts
            .into_iter()
            .map(|post| {
                let like_count = like_counts.remove(&post.id).unwrap_or(0);
                let comments = comment_threads.remove(&post.id).unwrap_or_default();
                FeedEntry {
                    post,
                    like_count,
                    comments,
                }
            })
            .collect();

        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prelude::*;
    use crate::ids::UserId;
    use crate::test_utils::{fields, setup_test_db, MemoryMediaStore};
    use std::sync::Arc;

    async fn setup() -> (FeedService, PostsService, SocialService, DatabaseConnection) {
        let db = setup_test_db().await;
        let posts = PostsService::new(db.clone(), Arc::new(MemoryMediaStore::new()));
        let social = SocialService::new(db.clone());
        let feed = FeedService::new(posts.clone(), social.clone());
        (feed, posts, social, db)
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let (feed, _, _, _) = setup().await;

        let entries = feed.assemble_feed().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_feed_preserves_post_ordering() {
        let (feed, _, _, db) = setup().await;
        let owner = UserId::new();

        // Insert directly so timestamps are controlled
        for (title, created_at) in [
            ("middle", "2026-08-02T10:00:00+00:00"),
            ("oldest", "2026-08-01T10:00:00+00:00"),
            ("newest", "2026-08-03T10:00:00+00:00"),
        ] {
            let post = PostActiveModel {
                id: NotSet,
                user_id: Set(owner),
                title: Set(title.to_string()),
                description: Set(String::new()),
                image_url: Set(None),
                crowd: Set(String::new()),
                chips: Set(String::new()),
                queue_time: Set(String::new()),
                created_at: Set(created_at.to_string()),
            };
            Post::insert(post).exec(&db).await.unwrap();
        }

        let entries = feed.assemble_feed().await.unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.post.title.as_str()).collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_aggregation_completeness() {
        let (feed, posts, _, _) = setup().await;
        let owner = UserId::new();

        let post = posts.create(owner, fields("Quiet"), None).await.unwrap();

        let entries = feed.assemble_feed().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].post.id, post.id);
        assert_eq!(entries[0].like_count, 0);
        assert!(entries[0].comments.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_comment_and_double_like() {
        // User A posts "Ramen"; user B comments once and likes twice.
        let (feed, posts, social, _) = setup().await;
        let a = UserId::new();
        let b = UserId::new();

        let post = posts.create(a, fields("Ramen"), None).await.unwrap();

        social.add_comment(post.id, b, "great spot").await.unwrap();
        social.add_like(post.id, b).await.unwrap();
        social.add_like(post.id, b).await.unwrap();

        let entries = feed.assemble_feed().await.unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.post.title, "Ramen");
        assert_eq!(entry.post.image_url, None);
        assert_eq!(entry.like_count, 1);
        assert_eq!(entry.comments.len(), 1);
        assert_eq!(entry.comments[0].user_id, b);
        assert_eq!(entry.comments[0].content, "great spot");
    }

    #[tokio::test]
    async fn test_feed_zips_metadata_to_the_right_posts() {
        let (feed, posts, social, _) = setup().await;
        let owner = UserId::new();

        let first = posts.create(owner, fields("First"), None).await.unwrap();
        let second = posts.create(owner, fields("Second"), None).await.unwrap();

        social.add_like(first.id, UserId::new()).await.unwrap();
        social.add_like(first.id, UserId::new()).await.unwrap();
        social
            .add_comment(second.id, UserId::new(), "only here")
            .await
            .unwrap();

        let entries = feed.assemble_feed().await.unwrap();
        let by_id = |id| entries.iter().find(|e| e.post.id == id).unwrap();

        assert_eq!(by_id(first.id).like_count, 2);
        assert!(by_id(first.id).comments.is_empty());
        assert_eq!(by_id(second.id).like_count, 0);
        assert_eq!(by_id(second.id).comments.len(), 1);
    }
}
