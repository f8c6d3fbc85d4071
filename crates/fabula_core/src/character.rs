//! Character records for the story cast.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id assigned to the character seeded into a fresh session.
pub const INITIAL_CHARACTER_ID: &str = "initial";

/// A member of the story's cast.
///
/// Roster order is semantically meaningful: the character at index 0 is
/// the first-person narrator. Fields other than `id` are mutated in
/// place as the user edits the cast; the id stays stable for the life of
/// the record.
///
/// # Examples
///
/// ```
/// use fabula_core::Character;
///
/// let character = Character::new("Mira");
/// assert_eq!(character.name, "Mira");
/// assert!(character.is_original);
/// assert!(!character.id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    /// Unique, stable identifier
    pub id: String,
    /// Display name; the first roster entry's name doubles as the
    /// narrator identity
    pub name: String,
    /// Free-form gender description
    pub gender: String,
    /// Free-form age description
    pub age: String,
    /// Personality sketch used in prompt assembly
    pub personality: String,
    /// Abilities or talents used in prompt assembly
    pub ability: String,
    /// Whether the character is an original creation rather than drawn
    /// from source material
    pub is_original: bool,
    /// Free-form notes given the highest priority in prompt assembly
    pub free_text: String,
}

impl Character {
    /// Create a named character with a fresh unique id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a blank character with a fresh unique id.
    pub fn blank() -> Self {
        Self::new("")
    }

    /// The blank character seeded into a fresh session.
    pub fn initial() -> Self {
        Self {
            id: INITIAL_CHARACTER_ID.to_string(),
            ..Self::default()
        }
    }

    /// Whether any of the prompt-relevant detail fields is non-empty.
    pub fn has_details(&self) -> bool {
        !self.free_text.is_empty() || !self.personality.is_empty() || !self.ability.is_empty()
    }
}

impl Default for Character {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            gender: String::new(),
            age: String::new(),
            personality: String::new(),
            ability: String::new(),
            is_original: true,
            free_text: String::new(),
        }
    }
}
