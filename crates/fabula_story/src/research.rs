//! The three-slot research store.

use fabula_core::ResearchResult;
use fabula_error::{FabulaResult, StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};

/// Addresses one of the three independent research slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ResearchSlot {
    /// Source-material research
    Source,
    /// Research for the first character
    Character1,
    /// Research for the second character
    Character2,
}

/// How a research topic should be framed for the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchKind {
    /// The work itself: plot, world, tone
    Source,
    /// A single character within the work
    Character,
}

impl ResearchSlot {
    /// The framing used when researching this slot.
    pub fn kind(&self) -> ResearchKind {
        match self {
            ResearchSlot::Source => ResearchKind::Source,
            ResearchSlot::Character1 | ResearchSlot::Character2 => ResearchKind::Character,
        }
    }
}

/// Topics and fetched results for the three research slots.
///
/// Each slot is independent: a fetch replaces the slot's result
/// wholesale, a text edit touches only the result text. The store is
/// read-only for prompt assembly.
///
/// # Examples
///
/// ```
/// use fabula_core::ResearchResult;
/// use fabula_story::{ResearchSlot, ResearchStore};
///
/// let mut store = ResearchStore::default();
/// store.set_topic(ResearchSlot::Source, "The Gormenghast novels");
/// store.set_topic(ResearchSlot::Character1, "Steerpike");
///
/// // Character lookups fold in the source topic for disambiguation.
/// assert_eq!(
///     store.combined_topic(ResearchSlot::Character1),
///     "Steerpike (The Gormenghast novels)"
/// );
///
/// store.set_result(ResearchSlot::Source, ResearchResult::default());
/// assert!(store.result(ResearchSlot::Source).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResearchStore {
    /// Topic for the source-material slot
    pub research_source_topic: String,
    /// Fetched source-material research
    pub research_source_result: Option<ResearchResult>,
    /// Topic for the first character slot
    pub research_character_topic1: String,
    /// Fetched research for the first character
    pub research_character_result1: Option<ResearchResult>,
    /// Topic for the second character slot
    pub research_character_topic2: String,
    /// Fetched research for the second character
    pub research_character_result2: Option<ResearchResult>,
}

impl ResearchStore {
    /// The topic configured for a slot.
    pub fn topic(&self, slot: ResearchSlot) -> &str {
        match slot {
            ResearchSlot::Source => &self.research_source_topic,
            ResearchSlot::Character1 => &self.research_character_topic1,
            ResearchSlot::Character2 => &self.research_character_topic2,
        }
    }

    /// Set the topic for a slot.
    pub fn set_topic(&mut self, slot: ResearchSlot, topic: impl Into<String>) {
        let topic = topic.into();
        match slot {
            ResearchSlot::Source => self.research_source_topic = topic,
            ResearchSlot::Character1 => self.research_character_topic1 = topic,
            ResearchSlot::Character2 => self.research_character_topic2 = topic,
        }
    }

    /// The fetched result for a slot, if any.
    pub fn result(&self, slot: ResearchSlot) -> Option<&ResearchResult> {
        match slot {
            ResearchSlot::Source => self.research_source_result.as_ref(),
            ResearchSlot::Character1 => self.research_character_result1.as_ref(),
            ResearchSlot::Character2 => self.research_character_result2.as_ref(),
        }
    }

    /// Replace a slot's result wholesale.
    pub fn set_result(&mut self, slot: ResearchSlot, result: ResearchResult) {
        let target = match slot {
            ResearchSlot::Source => &mut self.research_source_result,
            ResearchSlot::Character1 => &mut self.research_character_result1,
            ResearchSlot::Character2 => &mut self.research_character_result2,
        };
        *target = Some(result);
    }

    /// Clear a slot's result.
    pub fn clear_result(&mut self, slot: ResearchSlot) {
        match slot {
            ResearchSlot::Source => self.research_source_result = None,
            ResearchSlot::Character1 => self.research_character_result1 = None,
            ResearchSlot::Character2 => self.research_character_result2 = None,
        }
    }

    /// Replace only the text of a slot's result, keeping its sources.
    ///
    /// # Errors
    ///
    /// Fails when the slot has no result to edit.
    pub fn edit_text(&mut self, slot: ResearchSlot, text: impl Into<String>) -> FabulaResult<()> {
        let result = match slot {
            ResearchSlot::Source => self.research_source_result.as_mut(),
            ResearchSlot::Character1 => self.research_character_result1.as_mut(),
            ResearchSlot::Character2 => self.research_character_result2.as_mut(),
        }
        .ok_or_else(|| StoryError::new(StoryErrorKind::MissingResearch(slot.to_string())))?;
        result.text = text.into();
        Ok(())
    }

    /// The topic a fetch should actually search for.
    ///
    /// Character slots fold in the source topic as a parenthetical when
    /// one is configured, so a bare character name still lands on the
    /// right work.
    pub fn combined_topic(&self, slot: ResearchSlot) -> String {
        let topic = self.topic(slot);
        match slot.kind() {
            ResearchKind::Source => topic.to_string(),
            ResearchKind::Character if self.research_source_topic.is_empty() => topic.to_string(),
            ResearchKind::Character => format!("{} ({})", topic, self.research_source_topic),
        }
    }

    /// Reference text for completing the named character's details.
    ///
    /// When the character's name appears (case-insensitively) inside a
    /// character slot's topic, that slot's result is reused; otherwise
    /// the source-material research backs the completion.
    pub fn reference_for_character(&self, name: &str) -> Option<&str> {
        if !name.is_empty() {
            let name = name.to_lowercase();
            if self.research_character_topic1.to_lowercase().contains(&name)
                && let Some(result) = &self.research_character_result1
            {
                return Some(&result.text);
            }
            if self.research_character_topic2.to_lowercase().contains(&name)
                && let Some(result) = &self.research_character_result2
            {
                return Some(&result.text);
            }
        }
        self.research_source_result
            .as_ref()
            .map(|result| result.text.as_str())
    }
}
