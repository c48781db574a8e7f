//! Platform Allow-List
//!
//! Fixed mapping from role to whether that role may use the current
//! execution surface. Field roles work on mobile; back-office roles work on
//! the web console.

use serde::{Deserialize, Serialize};

use crate::domain::role::EffectiveRole;

/// Execution surface the application currently runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Web,
    Mobile,
}

impl Platform {
    /// Whether `role` may use this surface. Total over the role set;
    /// `Unknown` is denied everywhere.
    pub const fn allows(&self, role: EffectiveRole) -> bool {
        use EffectiveRole::*;
        match self {
            Platform::Web => matches!(role, Admin | Supervisor | CoopAdmin),
            Platform::Mobile => matches!(role, Agent | Producer | Supervisor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_allow_list() {
        assert!(Platform::Web.allows(EffectiveRole::Admin));
        assert!(Platform::Web.allows(EffectiveRole::Supervisor));
        assert!(Platform::Web.allows(EffectiveRole::CoopAdmin));
        assert!(!Platform::Web.allows(EffectiveRole::Agent));
        assert!(!Platform::Web.allows(EffectiveRole::Producer));
    }

    #[test]
    fn test_mobile_allow_list() {
        assert!(Platform::Mobile.allows(EffectiveRole::Agent));
        assert!(Platform::Mobile.allows(EffectiveRole::Producer));
        assert!(Platform::Mobile.allows(EffectiveRole::Supervisor));
        assert!(!Platform::Mobile.allows(EffectiveRole::Admin));
        assert!(!Platform::Mobile.allows(EffectiveRole::CoopAdmin));
    }

    #[test]
    fn test_unknown_is_denied_everywhere() {
        assert!(!Platform::Web.allows(EffectiveRole::Unknown));
        assert!(!Platform::Mobile.allows(EffectiveRole::Unknown));
    }
}
