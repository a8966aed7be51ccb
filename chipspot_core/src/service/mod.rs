pub mod feed;
pub mod moderation;
pub mod posts;
pub mod sessions;
pub mod social;
