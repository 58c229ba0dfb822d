//! Guard resolution errors.

use thiserror::Error;

/// Errors raised while turning a guard name into a guard.
///
/// Both are configuration defects: retrying will not help.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    /// The object registry has nothing under this name.
    #[error("\"{name}\" guard is not found in the object registry")]
    NotFound { name: String },

    /// The registry has an object under this name, but it was not
    /// registered as a guard for this state type.
    #[error("\"{name}\" in the object registry is not a guard for this machine (found {found})")]
    Invalid { name: String, found: String },
}

impl GuardError {
    /// Name of the guard that failed to resolve.
    pub fn guard_name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::Invalid { name, .. } => name,
        }
    }
}
