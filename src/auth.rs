//! Auth collaborator boundary
//!
//! The materializer needs the current user id before it writes anything.
//! The real provider wraps the hosted backend's session; tests use
//! [`StaticAuthProvider`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Auth failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in")]
    NotSignedIn,
}

/// Supplies the authenticated user identity
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current user id, or `AuthError::NotSignedIn` when no session exists
    async fn current_user_id(&self) -> Result<String, AuthError>;
}

/// Fixed-identity provider for tests and single-user deployments
#[derive(Debug, Clone, Default)]
pub struct StaticAuthProvider {
    user_id: Option<String>,
}

impl StaticAuthProvider {
    /// Provider that always reports `user_id` as signed in
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Provider that always reports signed out
    pub fn signed_out() -> Self {
        Self { user_id: None }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_user_id(&self) -> Result<String, AuthError> {
        debug!(signed_in = self.user_id.is_some(), "current_user_id: called");
        self.user_id.clone().ok_or(AuthError::NotSignedIn)
    }
}
