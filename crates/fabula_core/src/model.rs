//! Selectable generator models.

use serde::{Deserialize, Serialize};

/// The generator model used for story calls.
///
/// Serialized as the provider's model id so persisted sessions and
/// exported settings stay compatible with the wire format.
///
/// # Examples
///
/// ```
/// use fabula_core::StoryModel;
///
/// assert_eq!(StoryModel::default().as_str(), "gemini-2.5-flash");
/// let json = serde_json::to_string(&StoryModel::Pro).unwrap();
/// assert_eq!(json, "\"gemini-2.5-pro\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StoryModel {
    /// Fast, inexpensive model; also used for research and suggestion
    /// calls regardless of the selection
    #[default]
    #[serde(rename = "gemini-2.5-flash")]
    Flash,
    /// Higher-quality model for story generation
    #[serde(rename = "gemini-2.5-pro")]
    Pro,
}

impl StoryModel {
    /// Provider model id for the request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryModel::Flash => "gemini-2.5-flash",
            StoryModel::Pro => "gemini-2.5-pro",
        }
    }
}

impl std::fmt::Display for StoryModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
