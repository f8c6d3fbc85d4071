//! Session storage error types.

/// Specific error conditions for session state persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// Reading the stored blob failed
    Read(String),
    /// Writing the blob failed
    Write(String),
    /// Clearing the stored blob failed
    Clear(String),
    /// Serializing the session state failed
    Serialize(String),
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageErrorKind::Read(msg) => write!(f, "Failed to read session state: {}", msg),
            StorageErrorKind::Write(msg) => {
                write!(f, "Failed to write session state: {}", msg)
            }
            StorageErrorKind::Clear(msg) => {
                write!(f, "Failed to clear session state: {}", msg)
            }
            StorageErrorKind::Serialize(msg) => {
                write!(f, "Failed to serialize session state: {}", msg)
            }
        }
    }
}

/// Error type for storage operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Read("permission denied".to_string()));
/// assert!(format!("{}", err).contains("permission denied"));
/// ```
#[derive(Debug, Clone)]
pub struct StorageError {
    /// The specific error condition
    pub kind: StorageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Storage Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StorageError {}
