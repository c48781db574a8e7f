//! Session Lifecycle Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credential entity, status computation, collaborator traits
//! - `application/` - Session manager and configuration
//!
//! ## Lifecycle Model
//! - One ambient credential, owned by [`SessionManager`], never persisted here
//! - One pending refresh timer at most; rescheduling replaces it
//! - Proactive renewal ahead of expiry (`refresh_threshold` before `expires_at`)
//! - Revalidation on resume events compensates for suspended timers
//! - Renewal failure is terminal for the session: callers treat it as signed out

pub mod application;
pub mod domain;
pub mod error;


// Re-exports for convenience
pub use application::config::SessionConfig;
pub use application::manager::SessionManager;
pub use error::{SessionError, SessionResult};

pub mod models {
    pub use crate::domain::credential::*;
    pub use crate::domain::status::*;
}

pub mod provider {
    pub use crate::domain::provider::*;
}
