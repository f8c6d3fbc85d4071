//! Generator provider integrations for Fabula.
//!
//! [`GeminiClient`] is the production [`StoryDriver`] implementation;
//! [`ScriptedDriver`] is the in-memory double used by engine tests.
//!
//! [`StoryDriver`]: fabula_interface::StoryDriver

mod gemini;
mod scripted;

pub use gemini::{DEFAULT_BASE_URL, GeminiClient, GenerateContentRequest, GenerateContentResponse};
pub use scripted::ScriptedDriver;
