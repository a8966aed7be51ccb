use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{
    config::AdminCredentials,
    ids::UserId,
    oracle::IdentityOracle,
};

/// Resolved caller identity, carried as an explicit per-request value.
///
/// The administrator is a configured credential pair, never an oracle
/// account, so it gets its own variant rather than a flag on `Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Member(UserId),
    Administrator,
}

impl Session {
    /// Passes for members and the administrator alike.
    pub fn require_member(&self) -> Result<(), AuthError> {
        match self {
            Session::Anonymous => Err(AuthError::Unauthenticated),
            Session::Member(_) | Session::Administrator => Ok(()),
        }
    }

    pub fn require_administrator(&self) -> Result<(), AuthError> {
        match self {
            Session::Anonymous => Err(AuthError::Unauthenticated),
            Session::Member(_) => Err(AuthError::Forbidden),
            Session::Administrator => Ok(()),
        }
    }

    pub fn member_id(&self) -> Option<UserId> {
        match self {
            Session::Member(user_id) => Some(*user_id),
            _ => None,
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Session::Administrator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("not logged in")]
    Unauthenticated,

    #[error("administrator role required")]
    Forbidden,
}

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("registration failed: {0}")]
    RegistrationFailed(String),
}

#[derive(Clone)]
pub struct SessionsService {
    oracle: Arc<dyn IdentityOracle>,
    admin: Option<AdminCredentials>,
}

impl SessionsService {
    pub fn new(oracle: Arc<dyn IdentityOracle>, admin: Option<AdminCredentials>) -> Self {
        Self { oracle, admin }
    }

    /// Resolve a credential pair to a session.
    ///
    /// The configured administrator pair is checked before the oracle is
    /// consulted. A match grants `Administrator` unconditionally, even if
    /// the same credential also exists as a registered member.
    pub async fn login(
        &self,
        credential: &str,
        secret: &str,
    ) -> Result<Session, SessionsServiceError> {
        if let Some(admin) = &self.admin {
            if admin.matches(credential, secret) {
                debug!("administrator credentials matched, oracle bypassed");
                return Ok(Session::Administrator);
            }
        }

        let user_id = self
            .oracle
            .authenticate(credential, secret)
            .await
            .map_err(|error| SessionsServiceError::InvalidCredentials(error.to_string()))?;

        Ok(Session::Member(user_id))
    }

    /// Delegates entirely to the oracle; duplicate handling is its
    /// responsibility. A successful registration logs the caller in.
    pub async fn register(
        &self,
        credential: &str,
        secret: &str,
    ) -> Result<Session, SessionsServiceError> {
        let user_id = self
            .oracle
            .create_account(credential, secret)
            .await
            .map_err(|error| SessionsServiceError::RegistrationFailed(error.to_string()))?;

        Ok(Session::Member(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryOracle;

    fn admin_pair() -> AdminCredentials {
        AdminCredentials {
            credential: "admin@chipspot.test".to_string(),
            secret: "tartare".to_string(),
        }
    }

    fn service_with(oracle: Arc<MemoryOracle>, admin: Option<AdminCredentials>) -> SessionsService {
        SessionsService::new(oracle, admin)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let oracle = Arc::new(MemoryOracle::new());
        let service = service_with(oracle, None);

        let registered = service
            .register("bob@chipspot.test", "vinegar")
            .await
            .expect("registration should succeed");
        let user_id = registered.member_id().expect("registration yields a member");

        let session = service
            .login("bob@chipspot.test", "vinegar")
            .await
            .expect("login should succeed");
        assert_eq!(session, Session::Member(user_id));
    }

    #[tokio::test]
    async fn test_login_with_wrong_secret_fails() {
        let oracle = Arc::new(MemoryOracle::new());
        let service = service_with(oracle, None);

        service.register("bob@chipspot.test", "vinegar").await.unwrap();

        let result = service.login("bob@chipspot.test", "ketchup").await;
        assert!(matches!(
            result,
            Err(SessionsServiceError::InvalidCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_oracle_refused() {
        let oracle = Arc::new(MemoryOracle::new());
        let service = service_with(oracle, None);

        service.register("bob@chipspot.test", "vinegar").await.unwrap();

        let result = service.register("bob@chipspot.test", "other").await;
        assert!(matches!(
            result,
            Err(SessionsServiceError::RegistrationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_pair_resolves_administrator() {
        let oracle = Arc::new(MemoryOracle::new());
        let service = service_with(oracle.clone(), Some(admin_pair()));

        let session = service
            .login("admin@chipspot.test", "tartare")
            .await
            .unwrap();
        assert_eq!(session, Session::Administrator);
        assert_eq!(oracle.authenticate_calls(), 0, "oracle must be bypassed");
    }

    #[tokio::test]
    async fn test_admin_match_wins_over_registered_member() {
        // The admin credential also exists as a member account; the
        // configured pair still takes precedence.
        let oracle = Arc::new(MemoryOracle::new());
        let service = service_with(oracle.clone(), Some(admin_pair()));

        service
            .register("admin@chipspot.test", "tartare")
            .await
            .unwrap();

        let session = service
            .login("admin@chipspot.test", "tartare")
            .await
            .unwrap();
        assert_eq!(session, Session::Administrator);
        assert_eq!(oracle.authenticate_calls(), 0);
    }

    #[tokio::test]
    async fn test_admin_credential_with_wrong_secret_falls_through() {
        let oracle = Arc::new(MemoryOracle::new());
        let service = service_with(oracle.clone(), Some(admin_pair()));

        let result = service.login("admin@chipspot.test", "wrong").await;
        assert!(matches!(
            result,
            Err(SessionsServiceError::InvalidCredentials(_))
        ));
        assert_eq!(oracle.authenticate_calls(), 1, "oracle decides non-admin logins");
    }

    #[test]
    fn test_session_guards() {
        let member = Session::Member(UserId::new());

        assert_eq!(
            Session::Anonymous.require_member(),
            Err(AuthError::Unauthenticated)
        );
        assert_eq!(member.require_member(), Ok(()));
        assert_eq!(Session::Administrator.require_member(), Ok(()));

        assert_eq!(
            Session::Anonymous.require_administrator(),
            Err(AuthError::Unauthenticated)
        );
        assert_eq!(member.require_administrator(), Err(AuthError::Forbidden));
        assert_eq!(Session::Administrator.require_administrator(), Ok(()));
    }
}
