//! Domain Layer
//!
//! Credential entity, derived session status, and collaborator traits.

pub mod credential;
pub mod provider;
pub mod status;
