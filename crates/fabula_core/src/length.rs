//! Target length classes for generated segments.

use serde::{Deserialize, Serialize};

/// Advisory length class for a generated story segment.
///
/// The class maps to an approximate target character count that is
/// communicated to the generator but never enforced on its output.
///
/// # Examples
///
/// ```
/// use fabula_core::StoryLength;
///
/// assert_eq!(StoryLength::default(), StoryLength::Normal);
/// assert_eq!(StoryLength::Long.target_chars(), 800);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryLength {
    /// Around 250 characters
    Short,
    /// Around 500 characters
    #[default]
    Normal,
    /// Around 800 characters
    Long,
}

impl StoryLength {
    /// Approximate target character count for this class.
    pub fn target_chars(&self) -> u32 {
        match self {
            StoryLength::Short => 250,
            StoryLength::Normal => 500,
            StoryLength::Long => 800,
        }
    }
}
