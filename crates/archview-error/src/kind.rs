//! Error kinds for archview operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell invalid input apart from
/// environmental failures such as a rejected graph fetch or an unwritable
/// preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration or parameters
    ConfigInvalid,

    /// Operation exists but is handled by another layer
    NotImplemented,

    // =========================================================================
    // View input errors
    // =========================================================================
    /// Zoom level ordinal or name outside the known range
    UnknownZoomLevel,

    /// Export format outside the known enumeration
    UnknownExportFormat,

    /// Blank or otherwise malformed filter argument
    InvalidFilter,

    // =========================================================================
    // Loading errors
    // =========================================================================
    /// The external graph loader rejected or failed
    LoadFailed,

    // =========================================================================
    // Storage/IO errors
    // =========================================================================
    /// Preference storage could not be read or written. Raised by storage
    /// backends for every failure except a missing key.
    StorageFailed,

    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed
    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::LoadFailed | ErrorKind::IoFailed | ErrorKind::StorageFailed
        )
    }
}
