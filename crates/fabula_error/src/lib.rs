//! Error types for the Fabula story engine.
//!
//! This crate provides the foundation error types used throughout the
//! Fabula workspace: one kind enum and location-tracking error struct per
//! domain, aggregated into [`FabulaError`].

mod generator;
mod settings;
mod story;
mod storage;

pub use generator::{GeneratorError, GeneratorErrorKind};
pub use settings::{SettingsError, SettingsErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum FabulaErrorKind {
    /// Remote generator call failure
    Generator(GeneratorError),
    /// Story state or precondition failure
    Story(StoryError),
    /// Settings import/export failure
    Settings(SettingsError),
    /// Session persistence failure
    Storage(StorageError),
}

impl std::fmt::Display for FabulaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FabulaErrorKind::Generator(e) => write!(f, "{}", e),
            FabulaErrorKind::Story(e) => write!(f, "{}", e),
            FabulaErrorKind::Settings(e) => write!(f, "{}", e),
            FabulaErrorKind::Storage(e) => write!(f, "{}", e),
        }
    }
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, FabulaErrorKind, StoryError, StoryErrorKind};
///
/// let err: FabulaError = StoryError::new(StoryErrorKind::NotStarted).into();
/// assert!(matches!(err.kind(), FabulaErrorKind::Story(_)));
/// ```
#[derive(Debug)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }

    /// User-facing guidance where the kind provides one.
    ///
    /// Generator failures map to the guidance of their failure class;
    /// other kinds render their display message.
    pub fn guidance(&self) -> String {
        match self.kind() {
            FabulaErrorKind::Generator(e) => e.kind.guidance().to_string(),
            FabulaErrorKind::Story(e) => e.kind.to_string(),
            FabulaErrorKind::Settings(e) => e.kind.to_string(),
            FabulaErrorKind::Storage(e) => e.kind.to_string(),
        }
    }
}

impl std::fmt::Display for FabulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fabula Error: {}", self.0)
    }
}

impl std::error::Error for FabulaError {}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
