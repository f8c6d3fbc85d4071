//! Fabula: an interactive fiction-writing engine over a remote text
//! generator.
//!
//! A session configures a story's direction, cast, and prologue, then
//! iteratively extends the narrative through a generator. This facade
//! re-exports the workspace surface:
//!
//! - [`fabula_core`]: characters, research, length and model selectors,
//!   structured generator payloads.
//! - [`fabula_error`]: error kinds and the [`FabulaResult`] alias.
//! - [`fabula_interface`]: the [`StoryDriver`] seam.
//! - [`fabula_models`]: the Gemini provider and the scripted test
//!   driver.
//! - [`fabula_storage`]: session persistence.
//! - [`fabula_story`]: the timeline, prompt builders, and
//!   [`StoryEngine`].
//!
//! # Examples
//!
//! ```no_run
//! use fabula::{FileStore, GeminiClient, StoryEngine};
//!
//! # async fn run() -> fabula::FabulaResult<()> {
//! let driver = GeminiClient::new(std::env::var("GEMINI_API_KEY").unwrap_or_default())?;
//! let store = FileStore::default_location().map_err(fabula::FabulaError::from)?;
//! let mut engine = StoryEngine::load(driver, store);
//!
//! engine.set_story_direction("A slow-burn mystery in a snowbound village.");
//! engine.set_prologue("The night the bridge froze, {{char}} stopped counting lanterns.");
//! engine.update_character(&engine.session().characters.characters()[0].id.clone(), |c| {
//!     c.name = "narrator".to_string();
//! })?;
//! engine.start_story()?;
//!
//! let segment = engine.continue_story(None).await?;
//! println!("{}", segment);
//! # Ok(())
//! # }
//! ```

pub use fabula_core::{
    Character, CharacterSketch, GroundingSource, INITIAL_CHARACTER_ID, ResearchResult,
    StoryGenerationResult, StoryLength, StoryModel, init_tracing,
};
pub use fabula_error::{
    FabulaError, FabulaErrorKind, FabulaResult, GeneratorError, GeneratorErrorKind, SettingsError,
    SettingsErrorKind, StorageError, StorageErrorKind, StoryError, StoryErrorKind,
};
pub use fabula_interface::{GenerationOptions, StoryDriver};
pub use fabula_models::{GeminiClient, ScriptedDriver};
pub use fabula_storage::{FileStore, MemoryStore, SESSION_FILE, StateStore};
pub use fabula_story::{
    ActiveView, CharacterRoster, DEFAULT_LOOKBACK, ExportedSettings, MAX_SUGGESTIONS,
    PromptContext, ResearchKind, ResearchSlot, ResearchStore, SessionState, StoryEngine,
    StoryTimeline, SuggestOutcome, Suggestions, UNLIMITED_LOOKBACK, export_file_name,
    export_settings, import_settings, prompt, settings_from_session,
};
