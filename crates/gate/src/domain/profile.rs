//! Profile Store Trait
//!
//! Single-read interface to the external profile record, used as the
//! fallback role source when the credential carries no recognized role.

use session::models::SubjectId;
use thiserror::Error;

/// Error reported by the profile store
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// The store could not be reached
    #[error("Profile store unreachable: {0}")]
    Network(String),

    /// The record exists but could not be interpreted
    #[error("Profile record malformed: {0}")]
    Malformed(String),
}

/// Profile store trait
#[trait_variant::make(ProfileStore: Send)]
pub trait LocalProfileStore {
    /// Look up the role code recorded for a subject, if any.
    async fn lookup_role(&self, subject_id: &SubjectId) -> Result<Option<String>, ProfileError>;
}
