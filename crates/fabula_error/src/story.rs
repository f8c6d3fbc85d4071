//! Story engine error types.

/// Specific error conditions for story operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoryErrorKind {
    /// Story setup is missing required fields (direction, a named first
    /// character, and a prologue)
    SetupIncomplete,
    /// No characters are configured
    NoCharacters,
    /// The story has not been started yet
    NotStarted,
    /// The prologue alone cannot be rewritten
    PrologueRewrite,
    /// There is no deletable segment (the prologue is protected)
    NothingToDelete,
    /// Range deletion starting at the prologue needs the confirmed
    /// clear operation instead
    ClearRequiresConfirmation,
    /// The requested segment index does not exist
    InvalidRange(usize),
    /// A rewrite was requested without an instruction
    EmptyInstruction,
    /// The generator produced no usable text, even after the retry
    EmptyGeneration,
    /// A research fetch was requested without a topic
    EmptyTopic(String),
    /// The research slot has no result to edit
    MissingResearch(String),
    /// No character with the given id exists
    UnknownCharacter(String),
    /// The last remaining character cannot be removed
    LastCharacter,
    /// There is no story text to export
    EmptyExport,
}

impl std::fmt::Display for StoryErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryErrorKind::SetupIncomplete => write!(
                f,
                "Story setup is incomplete: a direction, at least one named \
                 character, and a prologue are all required"
            ),
            StoryErrorKind::NoCharacters => write!(f, "No characters are configured"),
            StoryErrorKind::NotStarted => write!(f, "The story has not been started"),
            StoryErrorKind::PrologueRewrite => {
                write!(f, "There is no rewritable passage; the prologue cannot be rewritten")
            }
            StoryErrorKind::NothingToDelete => {
                write!(f, "There is no deletable story segment")
            }
            StoryErrorKind::ClearRequiresConfirmation => write!(
                f,
                "Deleting from the prologue clears the whole story and requires \
                 explicit confirmation"
            ),
            StoryErrorKind::InvalidRange(index) => {
                write!(f, "No story segment exists at index {}", index)
            }
            StoryErrorKind::EmptyInstruction => {
                write!(f, "A rewrite instruction is required")
            }
            StoryErrorKind::EmptyGeneration => write!(
                f,
                "The generator could not produce a continuation. This can happen \
                 when the content brushes against the model's safety standards or \
                 the development has grown too tangled. Delete one segment to step \
                 back, adjust the directive, and try again"
            ),
            StoryErrorKind::EmptyTopic(slot) => {
                write!(f, "Enter a topic to research for the {} slot", slot)
            }
            StoryErrorKind::MissingResearch(slot) => {
                write!(f, "The {} research slot has no result to edit", slot)
            }
            StoryErrorKind::UnknownCharacter(id) => {
                write!(f, "No character with id '{}' exists", id)
            }
            StoryErrorKind::LastCharacter => {
                write!(f, "The last remaining character cannot be removed")
            }
            StoryErrorKind::EmptyExport => write!(f, "There is no story to export"),
        }
    }
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::NothingToDelete);
/// assert!(format!("{}", err).contains("deletable"));
/// ```
#[derive(Debug, Clone)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for StoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Story Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StoryError {}
