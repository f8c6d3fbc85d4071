//! Wire types for the Gemini `generateContent` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

/// Request body for a `generateContent` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl GenerateContentRequest {
    /// A plain text request with no config or tools.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: text.into() }],
            }],
            generation_config: None,
            tools: None,
        }
    }

    /// Attach a JSON response schema.
    pub fn with_schema(mut self, schema: JsonValue, thinking_budget: u32) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            // A zero budget omits the thinking config entirely
            thinking_config: (thinking_budget > 0).then_some(ThinkingConfig { thinking_budget }),
        });
        self
    }

    /// Enable the web search grounding tool.
    pub fn with_search(mut self) -> Self {
        self.tools = Some(vec![Tool {
            google_search: json!({}),
        }]);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: JsonValue,
}

/// Response body of a `generateContent` call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Web grounding sources of the first candidate, in response order.
    pub fn grounding_sources(&self) -> Vec<(String, String)> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter(|web| !web.uri.is_empty() && !web.title.is_empty())
                    .map(|web| (web.uri.clone(), web.title.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: CandidateContent,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

/// Response schema for story calls: `{story, suggestions}`.
pub fn story_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "story": {
                "type": "STRING",
                "description": "The generated narrative prose."
            },
            "suggestions": {
                "type": "ARRAY",
                "description": "Three next-development ideas.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["story", "suggestions"]
    })
}

/// Response schema for suggestion-only calls: `{suggestions}`.
pub fn suggestions_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "description": "Three next-development ideas.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["suggestions"]
    })
}

/// Response schema for character completion: `{personality, ability}`.
pub fn sketch_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "personality": {
                "type": "STRING",
                "description": "A detailed description of the character's personality."
            },
            "ability": {
                "type": "STRING",
                "description": "A concrete description of the character's abilities and talents."
            }
        },
        "required": ["personality", "ability"]
    })
}
