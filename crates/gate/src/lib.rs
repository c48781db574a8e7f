//! Access Gate Module
//!
//! Clean Architecture structure:
//! - `domain/` - Role and platform value objects, profile collaborator trait
//! - `application/` - The gate itself (authorization decisions)
//!
//! ## Decision Model
//! - One decision per protected-view render: checking, unauthenticated,
//!   platform denied, role denied, or authorized
//! - Effective role resolves from credential claims first, then one profile
//!   lookup per mount; lookup failures resolve to `Unknown` (fail closed)
//! - Protected content renders only in the authorized state

pub mod application;
pub mod domain;


// Re-exports for convenience
pub use application::authorize::{AccessGate, AuthorizeRequest, GateDecision, SessionInfo};
pub use domain::platform::Platform;
pub use domain::role::EffectiveRole;

pub mod profile {
    pub use crate::domain::profile::*;
}
