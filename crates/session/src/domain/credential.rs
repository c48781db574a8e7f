//! Credential Entity
//!
//! An opaque, time-limited authentication token bundle issued by the external
//! identity provider. A credential is either live (`now < expires_at`) or
//! expired; there is no partially valid state. It lives in process memory
//! only and is discarded on sign-out, renewal failure, or teardown.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known claim key carrying an embedded role, when the provider issues one.
pub const ROLE_CLAIM: &str = "role";

/// Stable identifier of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credential entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Subject the credential was issued to
    pub subject_id: SubjectId,
    /// Claims embedded by the identity provider (may include a role)
    pub issued_claims: BTreeMap<String, String>,
    /// Absolute expiry instant (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl Credential {
    pub fn new(
        subject_id: SubjectId,
        issued_claims: BTreeMap<String, String>,
        expires_at_ms: i64,
    ) -> Self {
        Self {
            subject_id,
            issued_claims,
            expires_at_ms,
        }
    }

    /// Whether the credential is past its expiry at the given instant.
    #[inline]
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Time until expiry in milliseconds. Negative once expired.
    #[inline]
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.expires_at_ms - now_ms
    }

    /// The embedded role claim, if the provider issued one.
    pub fn role_claim(&self) -> Option<&str> {
        self.issued_claims.get(ROLE_CLAIM).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(expires_at_ms: i64) -> Credential {
        Credential::new(SubjectId::new("subject-1"), BTreeMap::new(), expires_at_ms)
    }

    #[test]
    fn test_expiry_boundary() {
        let cred = credential(10_000);
        assert!(!cred.is_expired(9_999));
        assert!(cred.is_expired(10_000));
        assert!(cred.is_expired(10_001));
    }

    #[test]
    fn test_remaining_can_go_negative() {
        let cred = credential(10_000);
        assert_eq!(cred.remaining_ms(4_000), 6_000);
        assert_eq!(cred.remaining_ms(12_000), -2_000);
    }

    #[test]
    fn test_role_claim() {
        let mut cred = credential(10_000);
        assert_eq!(cred.role_claim(), None);

        cred.issued_claims
            .insert(ROLE_CLAIM.to_string(), "supervisor".to_string());
        assert_eq!(cred.role_claim(), Some("supervisor"));
    }

    #[test]
    fn test_serde_field_names() {
        let cred = credential(10_000);
        let json = serde_json::to_string(&cred).unwrap();
        assert!(json.contains("subjectId"));
        assert!(json.contains("issuedClaims"));
        assert!(json.contains("expiresAtMs"));
    }
}
