//! Canonical registration status taxonomy.
//!
//! Every registration ends up in exactly one of these states. Raw strings
//! coming back from registry lookups are matched against the canonical
//! strings by exact equality; anything else goes through the fallback chain
//! in [`crate::registration`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of registration states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationStatus {
    #[serde(rename = "current and active")]
    CurrentAndActive,
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "suspended")]
    Suspended,
    #[serde(rename = "retired")]
    Retired,
    #[serde(rename = "not found")]
    NotFound,
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "not checked automatically, check manually")]
    NotCheckedAutomatically,
    #[serde(rename = "error, check manually")]
    Error,
}

impl RegistrationStatus {
    /// All members in declaration order.
    pub const ALL: [RegistrationStatus; 8] = [
        RegistrationStatus::CurrentAndActive,
        RegistrationStatus::Expired,
        RegistrationStatus::Suspended,
        RegistrationStatus::Retired,
        RegistrationStatus::NotFound,
        RegistrationStatus::Unknown,
        RegistrationStatus::NotCheckedAutomatically,
        RegistrationStatus::Error,
    ];

    /// Canonical display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::CurrentAndActive => "current and active",
            RegistrationStatus::Expired => "expired",
            RegistrationStatus::Suspended => "suspended",
            RegistrationStatus::Retired => "retired",
            RegistrationStatus::NotFound => "not found",
            RegistrationStatus::Unknown => "unknown",
            RegistrationStatus::NotCheckedAutomatically => {
                "not checked automatically, check manually"
            }
            RegistrationStatus::Error => "error, check manually",
        }
    }

    /// Look up the member whose canonical string equals `raw` exactly.
    ///
    /// No trimming or case folding: `"Current and active"` does not match.
    pub fn from_canonical(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, RegistrationStatus::CurrentAndActive)
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
