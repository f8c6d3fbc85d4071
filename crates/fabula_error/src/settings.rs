//! Settings file error types.

/// Specific error conditions for settings import and export.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SettingsErrorKind {
    /// The settings payload is not valid JSON
    Parse(String),
    /// A required field is missing from the settings payload
    MissingField(&'static str),
    /// Serializing settings for export failed
    Serialize(String),
}

impl std::fmt::Display for SettingsErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsErrorKind::Parse(msg) => {
                write!(f, "Failed to parse settings: {}", msg)
            }
            SettingsErrorKind::MissingField(field) => {
                write!(f, "Settings file is missing the required field '{}'", field)
            }
            SettingsErrorKind::Serialize(msg) => {
                write!(f, "Failed to serialize settings: {}", msg)
            }
        }
    }
}

/// Error type for settings operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{SettingsError, SettingsErrorKind};
///
/// let err = SettingsError::new(SettingsErrorKind::MissingField("prologue"));
/// assert!(format!("{}", err).contains("prologue"));
/// ```
#[derive(Debug, Clone)]
pub struct SettingsError {
    /// The specific error condition
    pub kind: SettingsErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SettingsError {
    /// Create a new SettingsError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SettingsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Settings Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for SettingsError {}
