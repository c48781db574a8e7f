//! Domain Layer
//!
//! Role and platform value objects plus the profile collaborator trait.

pub mod platform;
pub mod profile;
pub mod role;
