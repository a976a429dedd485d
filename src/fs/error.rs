use thiserror::Error;

/// Errors reported by the filesystem engine.
///
/// Every failure is returned to the caller; the engine stays usable after
/// any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// Filesystem is not formatted or not mounted.
    #[error("filesystem is not formatted or not mounted")]
    NotReady,

    /// File count at its limit, or no free block run large enough.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// Path, name, descriptor or handle lookup miss.
    #[error("not found: {0}")]
    NotFound(String),

    /// Name already taken in the target directory.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Request is well-formed but not allowed in the current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type FsResult<T> = Result<T, FsError>;

impl FsError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidOperation(what.into())
    }

    pub fn no_space(what: impl Into<String>) -> Self {
        Self::CapacityExceeded(what.into())
    }
}
