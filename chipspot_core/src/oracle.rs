use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::UserId;

/// Failure reported by the identity provider. The message is surfaced
/// verbatim to the caller for display; the core never inspects it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct OracleError(pub String);

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// An account as the oracle's administrative listing reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleAccount {
    pub id: UserId,
    pub credential: String,
}

/// The external identity provider, treated as a black box. It owns the
/// member account space entirely: registration, credential checks and
/// duplicate handling all happen on its side of this trait.
#[async_trait]
pub trait IdentityOracle: Send + Sync {
    async fn authenticate(&self, credential: &str, secret: &str) -> Result<UserId, OracleError>;

    async fn create_account(&self, credential: &str, secret: &str) -> Result<UserId, OracleError>;

    async fn list_accounts(&self) -> Result<Vec<OracleAccount>, OracleError>;

    async fn delete_account(&self, id: UserId) -> Result<(), OracleError>;
}
