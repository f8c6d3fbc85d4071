//! Live API tests, gated behind the `api` marker feature.
//!
//! Run with `cargo test -p fabula_models --features api` and a
//! `GEMINI_API_KEY` in the environment or a `.env` file.
#![cfg(feature = "api")]

use fabula_interface::{GenerationOptions, StoryDriver};
use fabula_models::GeminiClient;

fn client() -> GeminiClient {
    dotenvy::dotenv().ok();
    let key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");
    GeminiClient::new(key).expect("client creation failed")
}

#[tokio::test]
async fn generates_a_structured_story() {
    let driver = client();
    let result = driver
        .generate_story(
            "Write one short sentence of first-person narration about rain. \
             Finally, propose three intriguing ideas for how the story could continue.",
            &GenerationOptions::default(),
        )
        .await
        .expect("story call failed");

    assert!(!result.is_empty_story());
}

#[tokio::test]
async fn research_returns_text() {
    let driver = client();
    let result = driver
        .research("Summarize the topic below as bullet-point facts.\n\n# Topic\n\"the moon\"")
        .await
        .expect("research call failed");

    assert!(!result.text.is_empty());
}
