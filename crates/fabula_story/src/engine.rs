//! The continuation engine.
//!
//! [`StoryEngine`] owns the session state and orchestrates every
//! operation against the remote generator: continuation with its single
//! softened retry, rewriting the tip segment, suggestion refreshes, and
//! the deletion family. Operations take `&mut self`, so the borrow
//! checker enforces the one-generation-at-a-time rule; there is no
//! internal locking.
//!
//! After every state mutation the engine persists the session through
//! its [`StateStore`]. Persistence is fire and forget: failures are
//! logged and never fail the operation that triggered them.

use crate::prompt::{
    PromptContext, build_character_prompt, build_continuation_prompt, build_research_prompt,
    build_rewrite_prompt, build_suggestion_prompt,
};
use crate::research::ResearchSlot;
use crate::session::{ActiveView, SessionState};
use fabula_core::{Character, StoryLength, StoryModel};
use fabula_error::{FabulaError, FabulaResult, StoryError, StoryErrorKind};
use fabula_interface::{GenerationOptions, StoryDriver};
use fabula_storage::StateStore;
use tracing::{debug, info, instrument, warn};

/// Result of the suggestion half of [`StoryEngine::delete_last_and_suggest`].
///
/// The deletion half has already been applied by the time this value
/// exists, so a failed fetch is reported here instead of as an error for
/// the whole operation.
#[derive(Debug)]
pub enum SuggestOutcome {
    /// The cache was refreshed with these suggestions
    Refreshed(Vec<String>),
    /// The deletion stands, but the suggestion fetch failed
    Unavailable(FabulaError),
}

/// The story-state and prompt-continuation engine.
///
/// Owns one [`SessionState`] for the life of the session, generic over
/// the generator and the persistence seam.
pub struct StoryEngine<D, S> {
    driver: D,
    store: S,
    state: SessionState,
    initialized: bool,
}

/// Prompt context over an explicit history slice, so rewrite can exclude
/// the segment being replaced.
fn context<'a>(state: &'a SessionState, history: &'a [String]) -> PromptContext<'a> {
    PromptContext {
        direction: &state.story_direction,
        length: state.story_length,
        characters: state.characters.characters(),
        research: [
            state.research.result(ResearchSlot::Source),
            state.research.result(ResearchSlot::Character1),
            state.research.result(ResearchSlot::Character2),
        ],
        history,
        lookback: state.history_lookback_count,
    }
}

impl<D: StoryDriver, S: StateStore> StoryEngine<D, S> {
    /// Load the session from the store, or start from defaults.
    ///
    /// A corrupt blob is cleared and replaced with defaults rather than
    /// failing startup. Loading never writes the state back; the
    /// engine only persists after the first post-load mutation.
    #[instrument(skip(driver, store))]
    pub fn load(driver: D, store: S) -> Self {
        let mut engine = Self {
            driver,
            store,
            state: SessionState::default(),
            initialized: false,
        };

        match engine.store.load() {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(state) => {
                    debug!("Session state restored");
                    engine.state = state;
                }
                Err(e) => {
                    warn!(error = %e, "Stored session was corrupt, falling back to defaults");
                    if let Err(e) = engine.store.clear() {
                        warn!(error = %e, "Failed to clear corrupt session blob");
                    }
                }
            },
            Ok(None) => debug!("No stored session, starting fresh"),
            Err(e) => warn!(error = %e, "Failed to read stored session, starting fresh"),
        }

        engine.initialized = true;
        engine
    }

    /// Build an engine around existing state, for tests and tools that
    /// assemble a session by hand.
    pub fn with_state(driver: D, store: S, state: SessionState) -> Self {
        Self {
            driver,
            store,
            state,
            initialized: true,
        }
    }

    /// The current session state.
    pub fn session(&self) -> &SessionState {
        &self.state
    }

    /// The cached next-development suggestions.
    pub fn suggestions(&self) -> &[String] {
        self.state.suggestions.items()
    }

    /// Persist the session. Failures are logged, never surfaced.
    fn commit(&self) {
        if !self.initialized {
            return;
        }
        match serde_json::to_string(&self.state) {
            Ok(blob) => {
                if let Err(e) = self.store.save(&blob) {
                    warn!(error = %e, "Failed to persist session state");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session state"),
        }
    }

    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.state.selected_model,
            thinking_budget: self.state.thinking_budget,
        }
    }

    // ----- story lifecycle ------------------------------------------------

    /// Begin the story from the configured prologue.
    ///
    /// The `{{char}}` placeholder in the prologue is replaced with the
    /// first-person pronoun before the prologue becomes segment 0.
    ///
    /// # Errors
    ///
    /// Fails unless a direction, a named first character, and a prologue
    /// are all present.
    #[instrument(skip(self))]
    pub fn start_story(&mut self) -> FabulaResult<()> {
        if !self.state.is_ready_to_start() {
            return Err(StoryError::new(StoryErrorKind::SetupIncomplete).into());
        }
        let prologue = self.state.prologue.replace("{{char}}", "I");
        self.state.story_history.start(prologue);
        self.state.suggestions.clear();
        self.state.active_tab = ActiveView::Story;
        self.commit();
        info!("Story started");
        Ok(())
    }

    /// Generate and append the next segment.
    ///
    /// A whitespace-only story triggers exactly one retry with the
    /// softened prompt; a second empty result is surfaced as the
    /// empty-generation condition with the timeline untouched.
    #[instrument(skip(self, directive))]
    pub async fn continue_story(&mut self, directive: Option<&str>) -> FabulaResult<String> {
        if self.state.characters.is_empty() {
            return Err(StoryError::new(StoryErrorKind::NoCharacters).into());
        }
        if self.state.story_history.is_empty() {
            return Err(StoryError::new(StoryErrorKind::NotStarted).into());
        }
        let directive = directive.filter(|d| !d.trim().is_empty());
        self.state.suggestions.clear();

        let options = self.options();
        let prompt = build_continuation_prompt(
            &context(&self.state, self.state.story_history.segments()),
            directive,
            false,
        );
        let mut result = self.driver.generate_story(&prompt, &options).await?;

        if result.is_empty_story() {
            warn!("Generator returned an empty story, retrying once with a softened prompt");
            let retry_prompt = build_continuation_prompt(
                &context(&self.state, self.state.story_history.segments()),
                directive,
                true,
            );
            result = self.driver.generate_story(&retry_prompt, &options).await?;
        }

        if result.is_empty_story() {
            return Err(StoryError::new(StoryErrorKind::EmptyGeneration).into());
        }

        self.state.story_history.append(result.story.clone());
        self.state.suggestions.replace(result.suggestions);
        self.commit();
        info!(segments = self.state.story_history.len(), "Segment appended");
        Ok(result.story)
    }

    /// Rewrite the tip segment under an instruction.
    ///
    /// The prompt context excludes the segment being rewritten. There is
    /// no retry for an empty rewrite; the empty result is surfaced
    /// directly and the timeline stays untouched.
    #[instrument(skip(self, instruction))]
    pub async fn rewrite(&mut self, instruction: &str) -> FabulaResult<String> {
        if instruction.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyInstruction).into());
        }
        if self.state.story_history.len() < 2 {
            return Err(StoryError::new(StoryErrorKind::PrologueRewrite).into());
        }
        self.state.suggestions.clear();

        let options = self.options();
        let segments = self.state.story_history.segments();
        let (target, preceding) = match segments.split_last() {
            Some((target, preceding)) => (target.as_str(), preceding),
            None => return Err(StoryError::new(StoryErrorKind::NotStarted).into()),
        };
        let prompt = build_rewrite_prompt(&context(&self.state, preceding), target, instruction);
        let result = self.driver.generate_story(&prompt, &options).await?;

        if result.is_empty_story() {
            return Err(StoryError::new(StoryErrorKind::EmptyGeneration).into());
        }

        self.state.story_history.replace_last(result.story.clone())?;
        self.state.suggestions.replace(result.suggestions);
        self.commit();
        info!("Tip segment rewritten");
        Ok(result.story)
    }

    /// Refresh the suggestion cache from the current timeline.
    #[instrument(skip(self))]
    pub async fn suggest(&mut self) -> FabulaResult<Vec<String>> {
        if self.state.story_history.is_empty() {
            return Err(StoryError::new(StoryErrorKind::NotStarted).into());
        }
        self.state.suggestions.clear();

        let prompt = build_suggestion_prompt(
            self.state.story_history.segments(),
            self.state.history_lookback_count,
        );
        let suggestions = self.driver.generate_suggestions(&prompt).await?;
        self.state.suggestions.replace(suggestions);
        Ok(self.state.suggestions.items().to_vec())
    }

    /// Delete the tip segment.
    #[instrument(skip(self))]
    pub fn delete_last(&mut self) -> FabulaResult<()> {
        self.state.story_history.delete_last()?;
        self.state.suggestions.clear();
        self.commit();
        Ok(())
    }

    /// Delete the tip segment, then refresh suggestions from the
    /// shortened timeline.
    ///
    /// One logical call, two steps. When the suggestion fetch fails the
    /// deletion has already been applied; the outcome reports the
    /// partial success instead of rolling back.
    #[instrument(skip(self))]
    pub async fn delete_last_and_suggest(&mut self) -> FabulaResult<SuggestOutcome> {
        self.delete_last()?;

        let prompt = build_suggestion_prompt(
            self.state.story_history.segments(),
            self.state.history_lookback_count,
        );
        match self.driver.generate_suggestions(&prompt).await {
            Ok(suggestions) => {
                self.state.suggestions.replace(suggestions);
                Ok(SuggestOutcome::Refreshed(
                    self.state.suggestions.items().to_vec(),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Deletion applied, but the suggestion refresh failed");
                Ok(SuggestOutcome::Unavailable(e))
            }
        }
    }

    /// Delete every segment from `from` to the end.
    ///
    /// # Errors
    ///
    /// `from == 0` is refused here; clearing the whole story is the
    /// confirmed [`StoryEngine::clear_story`] operation.
    #[instrument(skip(self))]
    pub fn delete_range(&mut self, from: usize) -> FabulaResult<()> {
        self.state.story_history.truncate_from(from)?;
        self.state.suggestions.clear();
        self.commit();
        Ok(())
    }

    /// Clear the whole story, prologue included.
    ///
    /// The confirmation dialog is the caller's responsibility; invoking
    /// this method is the confirmation.
    #[instrument(skip(self))]
    pub fn clear_story(&mut self) -> FabulaResult<()> {
        self.state.story_history.clear();
        self.state.suggestions.clear();
        self.state.active_tab = ActiveView::Settings;
        self.commit();
        info!("Story cleared");
        Ok(())
    }

    /// Replace the tip segment with caller-supplied text.
    #[instrument(skip(self, text))]
    pub fn edit_last(&mut self, text: impl Into<String>) -> FabulaResult<()> {
        self.state.story_history.replace_last(text)?;
        self.state.suggestions.clear();
        self.commit();
        Ok(())
    }

    /// Render the story as plain text.
    pub fn export_story(&self) -> FabulaResult<String> {
        self.state.story_history.export()
    }

    // ----- research -------------------------------------------------------

    /// Fetch research for a slot, replacing its result.
    #[instrument(skip(self))]
    pub async fn research(&mut self, slot: ResearchSlot) -> FabulaResult<()> {
        if self.state.research.topic(slot).trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyTopic(slot.to_string())).into());
        }

        let prompt = build_research_prompt(&self.state.research.combined_topic(slot), slot.kind());
        let result = self.driver.research(&prompt).await?;
        self.state.research.set_result(slot, result);
        self.commit();
        info!(%slot, "Research updated");
        Ok(())
    }

    /// Set the research topic for a slot.
    pub fn set_research_topic(&mut self, slot: ResearchSlot, topic: impl Into<String>) {
        self.state.research.set_topic(slot, topic);
        self.commit();
    }

    /// Replace the text of a slot's research result, keeping its
    /// sources.
    pub fn edit_research(&mut self, slot: ResearchSlot, text: impl Into<String>) -> FabulaResult<()> {
        self.state.research.edit_text(slot, text)?;
        self.commit();
        Ok(())
    }

    // ----- cast -----------------------------------------------------------

    /// Add a blank character and return its id.
    pub fn add_character(&mut self) -> String {
        let id = self.state.characters.add().id.clone();
        self.commit();
        id
    }

    /// Remove a character; the last one is protected.
    pub fn remove_character(&mut self, id: &str) -> FabulaResult<()> {
        self.state.characters.remove(id)?;
        self.commit();
        Ok(())
    }

    /// Mutate a character's fields in place.
    pub fn update_character(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Character),
    ) -> FabulaResult<()> {
        self.state.characters.update(id, f)?;
        self.commit();
        Ok(())
    }

    /// Complete a character's personality and abilities from research.
    ///
    /// The reference text is the character-slot research whose topic
    /// contains the character's name, falling back to the source
    /// research. Fields the generator leaves empty keep their current
    /// values.
    #[instrument(skip(self))]
    pub async fn flesh_out_character(&mut self, id: &str) -> FabulaResult<()> {
        let character = self
            .state
            .characters
            .get(id)
            .cloned()
            .ok_or_else(|| StoryError::new(StoryErrorKind::UnknownCharacter(id.to_string())))?;
        let reference = self
            .state
            .research
            .reference_for_character(&character.name)
            .map(str::to_string);

        let prompt = build_character_prompt(&character, reference.as_deref());
        let sketch = self.driver.sketch_character(&prompt).await?;

        self.state.characters.update(id, |character| {
            if !sketch.personality.trim().is_empty() {
                character.personality = sketch.personality.clone();
            }
            if !sketch.ability.trim().is_empty() {
                character.ability = sketch.ability.clone();
            }
        })?;
        self.commit();
        info!(id, "Character fleshed out");
        Ok(())
    }

    // ----- configuration --------------------------------------------------

    /// Set the overall story direction.
    pub fn set_story_direction(&mut self, direction: impl Into<String>) {
        self.state.story_direction = direction.into();
        self.commit();
    }

    /// Set the advisory segment length class.
    pub fn set_story_length(&mut self, length: StoryLength) {
        self.state.story_length = length;
        self.commit();
    }

    /// Set the prologue text.
    pub fn set_prologue(&mut self, prologue: impl Into<String>) {
        self.state.prologue = prologue.into();
        self.commit();
    }

    /// Select the model used for story calls.
    pub fn set_selected_model(&mut self, model: StoryModel) {
        self.state.selected_model = model;
        self.commit();
    }

    /// Set how many trailing segments are fed back as context.
    pub fn set_history_lookback(&mut self, lookback: usize) {
        self.state.history_lookback_count = lookback;
        self.commit();
    }

    /// Set the generator-side thinking budget; zero disables it.
    pub fn set_thinking_budget(&mut self, budget: u32) {
        self.state.thinking_budget = budget;
        self.commit();
    }

    /// Switch the working view.
    pub fn set_active_view(&mut self, view: ActiveView) {
        self.state.active_tab = view;
        self.commit();
    }

    // ----- settings and lifecycle ----------------------------------------

    /// Export the shareable settings as pretty-printed JSON.
    pub fn export_settings(&self) -> FabulaResult<String> {
        crate::settings::export_settings(&self.state)
    }

    /// Import settings, leaving the story history untouched.
    pub fn import_settings(&mut self, json: &str) -> FabulaResult<()> {
        crate::settings::import_settings(&mut self.state, json)?;
        self.commit();
        Ok(())
    }

    /// Clear the persisted session and reinitialize every field.
    ///
    /// The confirmation dialog is the caller's responsibility.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> FabulaResult<()> {
        self.store.clear()?;
        self.state = SessionState::default();
        self.commit();
        info!("Session reset to defaults");
        Ok(())
    }
}
