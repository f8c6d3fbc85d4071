//! Gemini provider for the [`StoryDriver`] seam.

mod dto;

pub use dto::{GenerateContentRequest, GenerateContentResponse};

use async_trait::async_trait;
use fabula_core::{CharacterSketch, ResearchResult, StoryGenerationResult};
use fabula_error::{FabulaResult, GeneratorError, GeneratorErrorKind};
use fabula_interface::{GenerationOptions, StoryDriver};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Default REST endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for auxiliary calls (research, suggestions, character
/// sketches) regardless of the story model selection.
const AUXILIARY_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini `generateContent` API.
///
/// Structured story payloads are requested through JSON response
/// schemas; research calls use the web search grounding tool instead.
/// Malformed structured payloads degrade to a usable shape rather than
/// failing the call.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Rejects an empty credential up front, so every later call can
    /// assume one is present.
    pub fn new(api_key: impl Into<String>) -> FabulaResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeneratorError::new(GeneratorErrorKind::InvalidCredential(
                "no API key configured".to_string(),
            ))
            .into());
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the endpoint base, for proxies and tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[instrument(skip(self, request), fields(model = model))]
    async fn call(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> FabulaResult<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                GeneratorError::classified(format!(
                    "network failure while contacting the generator: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Generator call failed");
            return Err(GeneratorError::classified(format!("{}: {}", status, body)).into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GeneratorError::new(GeneratorErrorKind::Unclassified(format!(
                "response body could not be decoded: {}",
                e
            )))
        })?;

        debug!(candidates = parsed.candidates.len(), "Received response");
        Ok(parsed)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestionsPayload {
    suggestions: Vec<String>,
}

#[async_trait]
impl StoryDriver for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %options.model, prompt_len = prompt.len()))]
    async fn generate_story(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> FabulaResult<StoryGenerationResult> {
        let request = GenerateContentRequest::from_text(prompt)
            .with_schema(dto::story_schema(), options.thinking_budget);
        let response = self.call(options.model.as_str(), &request).await?;

        let raw = response.text();
        match serde_json::from_str::<StoryGenerationResult>(raw.trim()) {
            Ok(result) => Ok(result),
            Err(e) => {
                // The raw text is still usable as a story segment
                warn!(error = %e, "Structured story payload was malformed, using raw text");
                Ok(StoryGenerationResult {
                    story: raw,
                    suggestions: Vec::new(),
                })
            }
        }
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_suggestions(&self, prompt: &str) -> FabulaResult<Vec<String>> {
        let request =
            GenerateContentRequest::from_text(prompt).with_schema(dto::suggestions_schema(), 0);
        let response = self.call(AUXILIARY_MODEL, &request).await?;

        let raw = response.text();
        match serde_json::from_str::<SuggestionsPayload>(raw.trim()) {
            Ok(payload) => Ok(payload.suggestions),
            Err(e) => {
                warn!(error = %e, "Suggestion payload was malformed, returning none");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn research(&self, prompt: &str) -> FabulaResult<ResearchResult> {
        let request = GenerateContentRequest::from_text(prompt).with_search();
        let response = self.call(AUXILIARY_MODEL, &request).await?;

        let sources = response
            .grounding_sources()
            .into_iter()
            .map(|(uri, title)| fabula_core::GroundingSource { uri, title })
            .collect();
        Ok(ResearchResult::new(response.text(), sources))
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn sketch_character(&self, prompt: &str) -> FabulaResult<CharacterSketch> {
        let request =
            GenerateContentRequest::from_text(prompt).with_schema(dto::sketch_schema(), 0);
        let response = self.call(AUXILIARY_MODEL, &request).await?;

        let raw = response.text();
        match serde_json::from_str::<CharacterSketch>(raw.trim()) {
            Ok(sketch) => Ok(sketch),
            Err(e) => {
                warn!(error = %e, "Character sketch payload was malformed, returning empty");
                Ok(CharacterSketch::default())
            }
        }
    }
}
