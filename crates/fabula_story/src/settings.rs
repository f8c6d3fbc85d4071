//! Settings import and export.
//!
//! The settings file is the shareable subset of a session: story setup
//! and tuning, without the story history. Import validates the required
//! fields, accepts the legacy single-slot research field, and leaves the
//! running story untouched.

use crate::roster::CharacterRoster;
use crate::session::{DEFAULT_LOOKBACK, SessionState};
use fabula_core::{Character, ResearchResult, StoryLength, StoryModel};
use fabula_error::{FabulaResult, SettingsError, SettingsErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The exported settings record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSettings {
    pub story_direction: String,
    pub story_length: StoryLength,
    pub characters: Vec<Character>,
    pub prologue: String,
    pub research_source_result: Option<ResearchResult>,
    pub research_character_result1: Option<ResearchResult>,
    pub research_character_result2: Option<ResearchResult>,
    pub selected_model: StoryModel,
    pub history_lookback_count: usize,
    pub thinking_budget: u32,
}

/// Incoming settings payload; optional everywhere so validation can
/// produce field-level errors, with the legacy single-slot research
/// field accepted for the first character slot.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SettingsWire {
    story_direction: Option<String>,
    story_length: Option<StoryLength>,
    characters: Option<Vec<Character>>,
    prologue: Option<String>,
    research_source_result: Option<ResearchResult>,
    research_character_result1: Option<ResearchResult>,
    research_character_result2: Option<ResearchResult>,
    /// Legacy name for the first character slot
    research_character_result: Option<ResearchResult>,
    selected_model: Option<StoryModel>,
    history_lookback_count: Option<usize>,
    thinking_budget: Option<u32>,
}

/// Capture the shareable settings of a session.
pub fn settings_from_session(state: &SessionState) -> ExportedSettings {
    ExportedSettings {
        story_direction: state.story_direction.clone(),
        story_length: state.story_length,
        characters: state.characters.characters().to_vec(),
        prologue: state.prologue.clone(),
        research_source_result: state.research.research_source_result.clone(),
        research_character_result1: state.research.research_character_result1.clone(),
        research_character_result2: state.research.research_character_result2.clone(),
        selected_model: state.selected_model,
        history_lookback_count: state.history_lookback_count,
        thinking_budget: state.thinking_budget,
    }
}

/// Serialize settings as pretty-printed JSON.
pub fn export_settings(state: &SessionState) -> FabulaResult<String> {
    serde_json::to_string_pretty(&settings_from_session(state))
        .map_err(|e| SettingsError::new(SettingsErrorKind::Serialize(e.to_string())).into())
}

/// Parse and validate a settings payload, then apply it to the session.
///
/// Absent optional fields fall back to their documented defaults
/// (length normal, model flash, lookback 4, thinking budget 0). The
/// story history and research topics are not part of the settings file
/// and stay as they are.
///
/// # Errors
///
/// Fails when the payload is not valid JSON, or when `storyDirection`,
/// `characters`, or `prologue` is missing.
#[instrument(skip(state, json), fields(bytes = json.len()))]
pub fn import_settings(state: &mut SessionState, json: &str) -> FabulaResult<()> {
    let wire: SettingsWire = serde_json::from_str(json)
        .map_err(|e| SettingsError::new(SettingsErrorKind::Parse(e.to_string())))?;

    let story_direction = wire
        .story_direction
        .ok_or_else(|| SettingsError::new(SettingsErrorKind::MissingField("storyDirection")))?;
    let characters = wire
        .characters
        .ok_or_else(|| SettingsError::new(SettingsErrorKind::MissingField("characters")))?;
    let prologue = wire
        .prologue
        .ok_or_else(|| SettingsError::new(SettingsErrorKind::MissingField("prologue")))?;

    state.story_direction = story_direction;
    state.story_length = wire.story_length.unwrap_or_default();
    state.characters = CharacterRoster::from_characters(characters);
    state.prologue = prologue;
    state.research.research_source_result = wire.research_source_result;
    state.research.research_character_result1 = wire
        .research_character_result1
        .or(wire.research_character_result);
    state.research.research_character_result2 = wire.research_character_result2;
    state.selected_model = wire.selected_model.unwrap_or_default();
    state.history_lookback_count = wire.history_lookback_count.unwrap_or(DEFAULT_LOOKBACK);
    state.thinking_budget = wire.thinking_budget.unwrap_or(0);

    debug!("Settings imported");
    Ok(())
}

/// Timestamped file name for exports, `{prefix}_{yymmdd-HHMM}.{ext}`.
pub fn export_file_name(prefix: &str, extension: &str) -> String {
    let stamp = chrono::Local::now().format("%y%m%d-%H%M");
    format!("{}_{}.{}", prefix, stamp, extension)
}
