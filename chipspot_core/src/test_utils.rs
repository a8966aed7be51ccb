//! In-memory stand-ins for the external collaborators plus database
//! helpers, shared by the service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::ids::UserId;
use crate::media::{MediaError, MediaStore};
use crate::models::migrator::Migrator;
use crate::oracle::{IdentityOracle, OracleAccount, OracleError};
use crate::service::posts::PostFields;

/// Create a fresh in-memory SQLite database with all migrations applied.
/// Each call yields an isolated instance.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Post fields with a given title; the classification fields carry
/// plausible filler.
pub fn fields(title: &str) -> PostFields {
    PostFields {
        title: title.to_string(),
        description: format!("{title} - worth the trip"),
        crowd: "quiet".to_string(),
        chips: "crispy".to_string(),
        queue_time: "5 min".to_string(),
    }
}

struct StoredAccount {
    id: UserId,
    credential: String,
    secret: String,
}

/// Identity oracle backed by a vec behind a mutex. Mirrors the real
/// provider's observable behavior: opaque ids, duplicate refusal,
/// message-bearing failures.
pub struct MemoryOracle {
    accounts: Mutex<Vec<StoredAccount>>,
    authenticate_calls: AtomicUsize,
    listing_fails: AtomicBool,
}

impl MemoryOracle {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            authenticate_calls: AtomicUsize::new(0),
            listing_fails: AtomicBool::new(false),
        }
    }

    /// Register an account without going through the service layer.
    pub fn seed_account(&self, credential: &str, secret: &str) -> UserId {
        let id = UserId::new();
        self.accounts
            .lock()
            .expect("oracle lock poisoned")
            .push(StoredAccount {
                id,
                credential: credential.to_string(),
                secret: secret.to_string(),
            });
        id
    }

    /// How many times `authenticate` has been consulted. Lets tests
    /// prove the administrator short-circuit never reaches the oracle.
    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    /// Make `list_accounts` fail from now on.
    pub fn fail_listing(&self, fail: bool) {
        self.listing_fails.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityOracle for MemoryOracle {
    async fn authenticate(&self, credential: &str, secret: &str) -> Result<UserId, OracleError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);

        let accounts = self.accounts.lock().expect("oracle lock poisoned");
        accounts
            .iter()
            .find(|account| account.credential == credential && account.secret == secret)
            .map(|account| account.id)
            .ok_or_else(|| OracleError::new("Invalid login credentials"))
    }

    async fn create_account(&self, credential: &str, secret: &str) -> Result<UserId, OracleError> {
        let mut accounts = self.accounts.lock().expect("oracle lock poisoned");

        if accounts.iter().any(|account| account.credential == credential) {
            return Err(OracleError::new("User already registered"));
        }

        let id = UserId::new();
        accounts.push(StoredAccount {
            id,
            credential: credential.to_string(),
            secret: secret.to_string(),
        });
        Ok(id)
    }

    async fn list_accounts(&self) -> Result<Vec<OracleAccount>, OracleError> {
        if self.listing_fails.load(Ordering::SeqCst) {
            return Err(OracleError::new("admin listing unavailable"));
        }

        let accounts = self.accounts.lock().expect("oracle lock poisoned");
        Ok(accounts
            .iter()
            .map(|account| OracleAccount {
                id: account.id,
                credential: account.credential.clone(),
            })
            .collect())
    }

    async fn delete_account(&self, id: UserId) -> Result<(), OracleError> {
        let mut accounts = self.accounts.lock().expect("oracle lock poisoned");

        let before = accounts.len();
        accounts.retain(|account| account.id != id);

        if accounts.len() == before {
            return Err(OracleError::new("User not found"));
        }
        Ok(())
    }
}

/// Media store that mints a distinct url per upload.
pub struct MemoryMediaStore {
    uploads: AtomicUsize,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
        }
    }
}

impl Default for MemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, _bytes: Bytes) -> Result<String, MediaError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://media.test/upload/{n}"))
    }
}

/// Media store whose uploads always fail.
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    async fn upload(&self, _bytes: Bytes) -> Result<String, MediaError> {
        Err(MediaError::new("upload rejected"))
    }
}
