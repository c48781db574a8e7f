//! Session Status
//!
//! Derived, recomputed-on-demand view over a credential and a clock reading.
//! Never stored.

use std::time::Duration;

use crate::domain::credential::Credential;

/// Snapshot of a credential's validity at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    /// Remaining lifetime is positive
    pub is_valid: bool,
    /// Remaining lifetime fell below the refresh threshold
    pub needs_refresh: bool,
    /// Remaining lifetime, clamped at zero
    pub remaining: Duration,
}

impl SessionStatus {
    /// Compute the status of `credential` at `now_ms` under `refresh_threshold`.
    pub fn of(credential: &Credential, now_ms: i64, refresh_threshold: Duration) -> Self {
        let remaining_ms = credential.remaining_ms(now_ms);
        Self {
            is_valid: remaining_ms > 0,
            needs_refresh: remaining_ms < refresh_threshold.as_millis() as i64,
            remaining: Duration::from_millis(remaining_ms.max(0) as u64),
        }
    }
}

/// Human-readable remaining time for support/debug surfaces.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credential::SubjectId;
    use std::collections::BTreeMap;

    const THRESHOLD: Duration = Duration::from_secs(30 * 60);

    fn credential(expires_at_ms: i64) -> Credential {
        Credential::new(SubjectId::new("subject-1"), BTreeMap::new(), expires_at_ms)
    }

    #[test]
    fn test_valid_iff_remaining_positive() {
        let cred = credential(60_000);
        assert!(SessionStatus::of(&cred, 59_999, THRESHOLD).is_valid);
        assert!(!SessionStatus::of(&cred, 60_000, THRESHOLD).is_valid);
        assert!(!SessionStatus::of(&cred, 90_000, THRESHOLD).is_valid);
    }

    #[test]
    fn test_needs_refresh_under_threshold() {
        let threshold_ms = THRESHOLD.as_millis() as i64;
        let cred = credential(2 * threshold_ms);

        // remaining == 2 * threshold
        let status = SessionStatus::of(&cred, 0, THRESHOLD);
        assert!(status.is_valid);
        assert!(!status.needs_refresh);

        // remaining == threshold exactly: not yet under it
        let status = SessionStatus::of(&cred, threshold_ms, THRESHOLD);
        assert!(!status.needs_refresh);

        // one millisecond under the threshold
        let status = SessionStatus::of(&cred, threshold_ms + 1, THRESHOLD);
        assert!(status.needs_refresh);
    }

    #[test]
    fn test_expired_credential_needs_refresh_with_zero_remaining() {
        let cred = credential(1_000);
        let status = SessionStatus::of(&cred, 5_000, THRESHOLD);
        assert!(!status.is_valid);
        assert!(status.needs_refresh);
        assert_eq!(status.remaining, Duration::ZERO);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(2 * 3600)), "2h 0m");
        assert_eq!(
            format_remaining(Duration::from_secs(3600 + 23 * 60)),
            "1h 23m"
        );
        assert_eq!(format_remaining(Duration::from_secs(5 * 60 + 30)), "5m");
        assert_eq!(format_remaining(Duration::from_secs(42)), "42s");
        assert_eq!(format_remaining(Duration::ZERO), "0s");
    }
}
