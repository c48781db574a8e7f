use serde::{Deserialize, Serialize};
use std::fmt;

/// Effective authorization role.
///
/// Closed set; anything unrecognized resolves to `Unknown`, which every
/// allow-list denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveRole {
    Admin,
    Supervisor,
    Agent,
    Producer,
    CoopAdmin,
    #[default]
    Unknown,
}

impl EffectiveRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use EffectiveRole::*;
        match self {
            Admin => "admin",
            Supervisor => "supervisor",
            Agent => "agent",
            Producer => "producer",
            CoopAdmin => "coop_admin",
            Unknown => "unknown",
        }
    }

    /// Parse a recognized role code.
    ///
    /// Returns `None` for anything outside the recognized set, including
    /// `"unknown"` itself; resolution falls through to the next source.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use EffectiveRole::*;
        match code {
            "admin" => Some(Admin),
            "supervisor" => Some(Supervisor),
            "agent" => Some(Agent),
            "producer" => Some(Producer),
            "coop_admin" => Some(CoopAdmin),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, EffectiveRole::Unknown)
    }
}

impl fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
