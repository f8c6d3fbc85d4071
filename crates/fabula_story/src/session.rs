//! The persisted session aggregate.

use crate::research::ResearchStore;
use crate::roster::CharacterRoster;
use crate::suggestions::Suggestions;
use crate::timeline::StoryTimeline;
use fabula_core::{StoryLength, StoryModel};
use serde::{Deserialize, Serialize};

/// Default number of trailing segments fed back to the generator.
pub const DEFAULT_LOOKBACK: usize = 4;

/// The view the user is working in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActiveView {
    /// Story setup: direction, cast, prologue, research
    #[default]
    Settings,
    /// The running narrative
    Story,
}

/// Everything one writing session owns, persisted as a single unit.
///
/// The session exclusively owns its roster, research store, timeline,
/// and suggestion cache; nothing is shared outside it. The suggestion
/// cache is derived state and is skipped during serialization. Field
/// names serialize in camelCase so stored sessions and exported
/// settings stay compatible with the original wire format.
///
/// # Examples
///
/// ```
/// use fabula_story::SessionState;
///
/// let state = SessionState::default();
/// assert_eq!(state.history_lookback_count, 4);
/// assert_eq!(state.characters.len(), 1);
/// assert!(state.story_history.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    /// Overall direction of the story
    pub story_direction: String,
    /// Advisory segment length class
    pub story_length: StoryLength,
    /// The cast, narrator first
    pub characters: CharacterRoster,
    /// Opening passage; becomes segment 0 when the story starts
    pub prologue: String,
    /// Model used for story calls
    pub selected_model: StoryModel,
    /// Number of trailing segments fed back as context
    pub history_lookback_count: usize,
    /// Generator-side deliberation allowance; zero disables it
    pub thinking_budget: u32,
    /// Research topics and results
    #[serde(flatten)]
    pub research: ResearchStore,
    /// The narrative so far
    pub story_history: StoryTimeline,
    /// The view the user is working in
    pub active_tab: ActiveView,
    /// Derived next-development hints; rebuilt, never persisted
    #[serde(skip)]
    pub suggestions: Suggestions,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            story_direction: String::new(),
            story_length: StoryLength::default(),
            characters: CharacterRoster::default(),
            prologue: String::new(),
            selected_model: StoryModel::default(),
            history_lookback_count: DEFAULT_LOOKBACK,
            thinking_budget: 0,
            research: ResearchStore::default(),
            story_history: StoryTimeline::default(),
            active_tab: ActiveView::default(),
            suggestions: Suggestions::default(),
        }
    }
}

impl SessionState {
    /// Whether the setup fields required to start the story are present:
    /// a direction, a named narrator, and a prologue.
    pub fn is_ready_to_start(&self) -> bool {
        !self.story_direction.is_empty()
            && self
                .characters
                .protagonist()
                .is_some_and(|character| !character.name.is_empty())
            && !self.prologue.is_empty()
    }
}
