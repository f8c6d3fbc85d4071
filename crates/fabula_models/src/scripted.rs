//! Scripted in-memory driver for testing.
//!
//! Outcomes are queued per call shape and consumed in order, and every
//! prompt is recorded, so tests can assert both what the engine asked
//! and how it reacted.

use async_trait::async_trait;
use fabula_core::{CharacterSketch, ResearchResult, StoryGenerationResult};
use fabula_error::{FabulaResult, GeneratorError, GeneratorErrorKind};
use fabula_interface::{GenerationOptions, StoryDriver};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// In-memory driver that replays queued outcomes.
///
/// An exhausted queue yields an unclassified error rather than
/// panicking, so a miscounted script fails the assertion instead of the
/// harness.
///
/// # Examples
///
/// ```
/// use fabula_models::ScriptedDriver;
/// use fabula_core::StoryGenerationResult;
///
/// let driver = ScriptedDriver::new();
/// driver.push_story(Ok(StoryGenerationResult {
///     story: "The door was already open.".to_string(),
///     suggestions: vec!["Enter".to_string()],
/// }));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    stories: Mutex<VecDeque<FabulaResult<StoryGenerationResult>>>,
    suggestions: Mutex<VecDeque<FabulaResult<Vec<String>>>>,
    research: Mutex<VecDeque<FabulaResult<ResearchResult>>>,
    sketches: Mutex<VecDeque<FabulaResult<CharacterSketch>>>,
    prompts: Mutex<Vec<String>>,
}

/// Lock that shrugs off poisoning; the queues stay usable even after a
/// panicking test.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedDriver {
    /// Create a driver with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a story call outcome.
    pub fn push_story(&self, outcome: FabulaResult<StoryGenerationResult>) {
        lock(&self.stories).push_back(outcome);
    }

    /// Queue a suggestions call outcome.
    pub fn push_suggestions(&self, outcome: FabulaResult<Vec<String>>) {
        lock(&self.suggestions).push_back(outcome);
    }

    /// Queue a research call outcome.
    pub fn push_research(&self, outcome: FabulaResult<ResearchResult>) {
        lock(&self.research).push_back(outcome);
    }

    /// Queue a character sketch call outcome.
    pub fn push_sketch(&self, outcome: FabulaResult<CharacterSketch>) {
        lock(&self.sketches).push_back(outcome);
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    fn record(&self, prompt: &str) {
        lock(&self.prompts).push(prompt.to_string());
    }

    fn exhausted(shape: &str) -> GeneratorError {
        GeneratorError::new(GeneratorErrorKind::Unclassified(format!(
            "scripted driver has no more {} outcomes",
            shape
        )))
    }
}

#[async_trait]
impl StoryDriver for ScriptedDriver {
    async fn generate_story(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> FabulaResult<StoryGenerationResult> {
        self.record(prompt);
        lock(&self.stories)
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("story").into()))
    }

    async fn generate_suggestions(&self, prompt: &str) -> FabulaResult<Vec<String>> {
        self.record(prompt);
        lock(&self.suggestions)
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("suggestion").into()))
    }

    async fn research(&self, prompt: &str) -> FabulaResult<ResearchResult> {
        self.record(prompt);
        lock(&self.research)
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("research").into()))
    }

    async fn sketch_character(&self, prompt: &str) -> FabulaResult<CharacterSketch> {
        self.record(prompt);
        lock(&self.sketches)
            .pop_front()
            .unwrap_or_else(|| Err(Self::exhausted("sketch").into()))
    }
}
