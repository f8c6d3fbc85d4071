//! The ordered character roster.

use fabula_core::Character;
use fabula_error::{FabulaResult, StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered cast of characters; the entry at index 0 narrates.
///
/// The roster never reorders itself and never drops below one entry.
///
/// # Examples
///
/// ```
/// use fabula_story::CharacterRoster;
///
/// let mut roster = CharacterRoster::default();
/// assert_eq!(roster.len(), 1);
///
/// let id = roster.add().id.clone();
/// roster.remove(&id).unwrap();
///
/// // The last remaining character is protected.
/// let last = roster.characters()[0].id.clone();
/// assert!(roster.remove(&last).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRoster {
    characters: Vec<Character>,
}

impl Default for CharacterRoster {
    fn default() -> Self {
        Self {
            characters: vec![Character::initial()],
        }
    }
}

impl CharacterRoster {
    /// Build a roster from existing characters, substituting the default
    /// single-entry roster when given an empty sequence.
    pub fn from_characters(characters: Vec<Character>) -> Self {
        if characters.is_empty() {
            Self::default()
        } else {
            Self { characters }
        }
    }

    /// The cast, in narration-priority order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Number of cast members.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the roster is empty; only possible transiently during
    /// deserialization of hand-edited data.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The narrator, when the roster is non-empty.
    pub fn protagonist(&self) -> Option<&Character> {
        self.characters.first()
    }

    /// Append a blank character and return it.
    pub fn add(&mut self) -> &Character {
        self.characters.push(Character::blank());
        debug!(len = self.characters.len(), "Character added");
        // Just pushed, so the tail entry exists
        &self.characters[self.characters.len() - 1]
    }

    /// Remove the character with the given id.
    ///
    /// # Errors
    ///
    /// Fails for an unknown id, or when only one character remains.
    pub fn remove(&mut self, id: &str) -> FabulaResult<()> {
        if self.characters.len() <= 1 {
            return Err(StoryError::new(StoryErrorKind::LastCharacter).into());
        }
        let index = self
            .characters
            .iter()
            .position(|character| character.id == id)
            .ok_or_else(|| StoryError::new(StoryErrorKind::UnknownCharacter(id.to_string())))?;
        self.characters.remove(index);
        debug!(len = self.characters.len(), "Character removed");
        Ok(())
    }

    /// Look up a character by id.
    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    /// Mutate a character's fields in place.
    ///
    /// # Errors
    ///
    /// Fails for an unknown id.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut Character)) -> FabulaResult<()> {
        let character = self
            .characters
            .iter_mut()
            .find(|character| character.id == id)
            .ok_or_else(|| StoryError::new(StoryErrorKind::UnknownCharacter(id.to_string())))?;
        f(character);
        Ok(())
    }
}
