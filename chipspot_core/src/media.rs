use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Failure reported by the object store, surfaced verbatim to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct MediaError(pub String);

impl MediaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The external object store. Given raw image bytes it returns a public
/// url; the core stores the url and never touches the bytes again.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, bytes: Bytes) -> Result<String, MediaError>;
}
