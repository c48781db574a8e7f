//! Session Error Types

use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Error)]
pub enum SessionError {
    /// No live credential exists
    #[error("No active session")]
    NoSession,

    /// Credential renewal was rejected or errored
    #[error("Session renewal failed: {0}")]
    RefreshFailed(String),

    /// Sign-in was rejected by the identity provider
    #[error("Sign in failed: {0}")]
    SignInFailed(String),

    /// Identity provider call failed outside of a renewal
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Whether the caller must redirect the user to sign-in.
    ///
    /// `NoSession` and `RefreshFailed` are both terminal for the current
    /// session and must be handled identically.
    pub const fn requires_reauth(&self) -> bool {
        matches!(
            self,
            SessionError::NoSession | SessionError::RefreshFailed(_)
        )
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SessionError::NoSession => {
                tracing::debug!("No active session");
            }
            SessionError::RefreshFailed(msg) => {
                tracing::warn!(message = %msg, "Session renewal failed");
            }
            SessionError::SignInFailed(msg) => {
                tracing::warn!(message = %msg, "Sign in failed");
            }
            SessionError::Provider(msg) => {
                tracing::warn!(message = %msg, "Identity provider error");
            }
            SessionError::Internal(msg) => {
                tracing::error!(message = %msg, "Session internal error");
            }
        }
    }
}
