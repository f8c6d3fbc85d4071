//! Trait definitions for the Fabula story engine.
//!
//! The [`StoryDriver`] trait is the seam between the continuation engine
//! and concrete text-generation providers. The engine is generic over it,
//! so providers can be swapped and tests can run against a scripted
//! double without touching engine logic.

use async_trait::async_trait;
use fabula_core::{CharacterSketch, ResearchResult, StoryGenerationResult, StoryModel};
use fabula_error::FabulaResult;

/// Per-call options for story generation.
///
/// # Examples
///
/// ```
/// use fabula_interface::GenerationOptions;
///
/// let options = GenerationOptions::default();
/// assert_eq!(options.thinking_budget, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationOptions {
    /// Model used for the call
    pub model: StoryModel,
    /// Provider-side deliberation allowance; zero disables the thinking
    /// configuration entirely
    pub thinking_budget: u32,
}

/// A remote text-generation capability.
///
/// One method per structured payload shape the engine needs. Every call
/// either returns the full structured result or a classified error;
/// partial results are the provider's responsibility to degrade into a
/// usable shape (for example, raw text with no suggestions).
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Generate a story segment with accompanying next-development
    /// suggestions.
    async fn generate_story(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> FabulaResult<StoryGenerationResult>;

    /// Generate next-development suggestions only.
    async fn generate_suggestions(&self, prompt: &str) -> FabulaResult<Vec<String>>;

    /// Run a search-grounded research call.
    async fn research(&self, prompt: &str) -> FabulaResult<ResearchResult>;

    /// Flesh out a character's personality and abilities.
    async fn sketch_character(&self, prompt: &str) -> FabulaResult<CharacterSketch>;
}

#[async_trait]
impl<T: StoryDriver + ?Sized> StoryDriver for std::sync::Arc<T> {
    async fn generate_story(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> FabulaResult<StoryGenerationResult> {
        (**self).generate_story(prompt, options).await
    }

    async fn generate_suggestions(&self, prompt: &str) -> FabulaResult<Vec<String>> {
        (**self).generate_suggestions(prompt).await
    }

    async fn research(&self, prompt: &str) -> FabulaResult<ResearchResult> {
        (**self).research(prompt).await
    }

    async fn sketch_character(&self, prompt: &str) -> FabulaResult<CharacterSketch> {
        (**self).sketch_character(prompt).await
    }
}
