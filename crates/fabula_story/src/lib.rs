//! Story timeline, prompt assembly, and continuation engine for Fabula.
//!
//! The heart of the workspace: [`StoryTimeline`] holds the ordered
//! narrative segments, the [`prompt`] builders assemble generation
//! requests from direction, cast, research, and a bounded window of
//! history, and [`StoryEngine`] orchestrates generator calls while
//! keeping the timeline, suggestion cache, and persisted session
//! consistent.

mod engine;
pub mod prompt;
mod research;
mod roster;
mod session;
mod settings;
mod suggestions;
mod timeline;

pub use engine::{StoryEngine, SuggestOutcome};
pub use prompt::{PromptContext, UNLIMITED_LOOKBACK};
pub use research::{ResearchKind, ResearchSlot, ResearchStore};
pub use roster::CharacterRoster;
pub use session::{ActiveView, DEFAULT_LOOKBACK, SessionState};
pub use settings::{
    ExportedSettings, export_file_name, export_settings, import_settings, settings_from_session,
};
pub use suggestions::{MAX_SUGGESTIONS, Suggestions};
pub use timeline::StoryTimeline;
