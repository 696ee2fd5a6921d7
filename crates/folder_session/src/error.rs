//! Session error taxonomy.

use folder_host::HandleError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors surfaced by folder session operations.
pub enum SessionError {
    /// Access was denied or has not been granted.
    #[error("permission denied: {0}")]
    Permission(String),
    /// Enumeration, read, or write failed despite granted permission.
    #[error("io error: {0}")]
    Io(String),
    /// A cached or recent entry could not be resolved to a live handle.
    #[error("not found: {0}")]
    NotFound(String),
    /// The user dismissed an interactive flow.
    #[error("cancelled by user")]
    UserCancelled,
    /// The handle or host cannot perform the operation.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// No folder has been selected yet.
    #[error("no folder selected")]
    NoFolder,
    /// The persistence store failed.
    #[error("store error: {0}")]
    Store(String),
    /// A host surface (viewer, clipboard, helper window) failed.
    #[error("host surface error: {0}")]
    Surface(String),
}

impl From<HandleError> for SessionError {
    fn from(err: HandleError) -> Self {
        match err {
            HandleError::PermissionDenied(msg) => Self::Permission(msg),
            HandleError::NotFound(msg) => Self::NotFound(msg),
            HandleError::Io(msg) => Self::Io(msg),
            HandleError::Unsupported(msg) => Self::Unsupported(msg),
            HandleError::Aborted => Self::UserCancelled,
        }
    }
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
