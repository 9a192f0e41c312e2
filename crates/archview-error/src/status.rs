//! Error status for retry decisions

use strum_macros::{Display, IntoStaticStr};

use crate::ErrorKind;

/// Whether the caller may retry the failed operation.
///
/// The engine never retries on its own. The graph loader and the preference
/// store owner read this hint and apply their own policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorStatus {
    /// Retrying with the same input fails again, e.g. an unknown zoom level.
    #[default]
    Permanent,

    /// A retry may succeed, e.g. a graph fetch that timed out.
    Temporary,

    /// Was temporary but kept failing after retries.
    Persistent,
}

impl ErrorStatus {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorStatus::Temporary)
    }

    /// Mark as persistent after failed retries
    pub fn persist(self) -> Self {
        match self {
            ErrorStatus::Temporary => ErrorStatus::Persistent,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Default status for a freshly raised error of `kind`.
impl From<ErrorKind> for ErrorStatus {
    fn from(kind: ErrorKind) -> Self {
        if kind.is_retryable() {
            ErrorStatus::Temporary
        } else {
            ErrorStatus::Permanent
        }
    }
}
