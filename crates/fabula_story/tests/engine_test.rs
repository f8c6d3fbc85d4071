//! Behavioral tests for the continuation engine, run against the
//! scripted driver and the in-memory store.

use std::sync::Arc;

use fabula_core::{CharacterSketch, ResearchResult, StoryGenerationResult};
use fabula_error::{FabulaErrorKind, GeneratorError, GeneratorErrorKind, StoryErrorKind};
use fabula_models::ScriptedDriver;
use fabula_storage::MemoryStore;
use fabula_story::{ResearchSlot, SessionState, StoryEngine, SuggestOutcome};

type Engine = StoryEngine<Arc<ScriptedDriver>, Arc<MemoryStore>>;

fn session_with_story(segments: &[&str]) -> SessionState {
    let mut state = SessionState::default();
    state.story_direction = "a drowned city remembers".to_string();
    state.prologue = "The water took the bells first.".to_string();
    let id = state.characters.characters()[0].id.clone();
    state
        .characters
        .update(&id, |c| c.name = "Abel".to_string())
        .unwrap();
    if let Some((first, rest)) = segments.split_first() {
        state.story_history.start(*first);
        for segment in rest {
            state.story_history.append(*segment);
        }
    }
    state
}

fn engine_with(
    segments: &[&str],
) -> (Engine, Arc<ScriptedDriver>, Arc<MemoryStore>) {
    let driver = Arc::new(ScriptedDriver::new());
    let store = Arc::new(MemoryStore::new());
    let engine = StoryEngine::with_state(
        Arc::clone(&driver),
        Arc::clone(&store),
        session_with_story(segments),
    );
    (engine, driver, store)
}

fn story(text: &str, suggestions: &[&str]) -> StoryGenerationResult {
    StoryGenerationResult {
        story: text.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

fn network_error() -> GeneratorError {
    GeneratorError::new(GeneratorErrorKind::Network("connection refused".to_string()))
}

fn story_kind(err: &fabula_error::FabulaError) -> &StoryErrorKind {
    match err.kind() {
        FabulaErrorKind::Story(e) => &e.kind,
        other => panic!("expected a story error, got {:?}", other),
    }
}

// ----- continue -----------------------------------------------------------

#[tokio::test]
async fn continue_appends_segment_and_caches_suggestions() {
    let (mut engine, driver, _store) = engine_with(&["Prologue"]);
    driver.push_story(Ok(story("The tide shifted.", &["s1", "s2", "s3"])));

    let segment = engine.continue_story(None).await.unwrap();

    assert_eq!(segment, "The tide shifted.");
    assert_eq!(
        engine.session().story_history.segments(),
        &["Prologue", "The tide shifted."]
    );
    assert_eq!(engine.suggestions(), &["s1", "s2", "s3"]);
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn continue_requires_a_started_story() {
    let (mut engine, driver, _store) = engine_with(&[]);

    let err = engine.continue_story(None).await.unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::NotStarted));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn empty_story_triggers_exactly_one_softened_retry() {
    let (mut engine, driver, _store) = engine_with(&["Prologue"]);
    driver.push_story(Ok(story("   ", &[])));
    driver.push_story(Ok(story("Second try landed.", &["s1"])));

    let segment = engine.continue_story(Some("open the gate")).await.unwrap();

    assert_eq!(segment, "Second try landed.");
    let prompts = driver.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains("# Additional instruction"));
    assert!(prompts[1].contains("# Additional instruction"));
    // The directive survives into the retry prompt
    assert!(prompts[1].contains("open the gate"));
}

#[tokio::test]
async fn empty_retry_is_terminal_and_leaves_the_timeline_alone() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "Chapter one."]);
    driver.push_suggestions(Ok(vec!["stale".to_string()]));
    engine.suggest().await.unwrap();
    assert!(!engine.suggestions().is_empty());

    driver.push_story(Ok(story("", &[])));
    driver.push_story(Ok(story("\n  \n", &[])));

    let err = engine.continue_story(None).await.unwrap_err();

    assert!(matches!(story_kind(&err), StoryErrorKind::EmptyGeneration));
    // One suggestion call from the seeding, then exactly two story calls
    assert_eq!(driver.call_count(), 3);
    assert_eq!(
        engine.session().story_history.segments(),
        &["Prologue", "Chapter one."]
    );
    assert!(engine.suggestions().is_empty());
}

#[tokio::test]
async fn transport_errors_surface_without_mutation() {
    let (mut engine, driver, _store) = engine_with(&["Prologue"]);
    driver.push_story(Err(network_error().into()));

    let err = engine.continue_story(None).await.unwrap_err();

    match err.kind() {
        FabulaErrorKind::Generator(e) => {
            assert!(matches!(e.kind, GeneratorErrorKind::Network(_)));
        }
        other => panic!("expected a generator error, got {:?}", other),
    }
    assert_eq!(engine.session().story_history.len(), 1);
    // No retry for transport failures
    assert_eq!(driver.call_count(), 1);
}

// ----- rewrite ------------------------------------------------------------

#[tokio::test]
async fn rewrite_replaces_only_the_tip() {
    let (mut engine, driver, _store) =
        engine_with(&["Prologue", "The gate stood open.", "Abel hesitated."]);
    driver.push_story(Ok(story("Abel walked through.", &["s1", "s2", "s3"])));

    let rewritten = engine.rewrite("make him commit").await.unwrap();

    assert_eq!(rewritten, "Abel walked through.");
    assert_eq!(
        engine.session().story_history.segments(),
        &["Prologue", "The gate stood open.", "Abel walked through."]
    );
    assert_eq!(engine.suggestions(), &["s1", "s2", "s3"]);
}

#[tokio::test]
async fn rewrite_context_excludes_the_target_segment() {
    let (mut engine, driver, _store) =
        engine_with(&["Prologue", "A perfectly unique sentence."]);
    driver.push_story(Ok(story("Rewritten.", &[])));

    engine.rewrite("tighter").await.unwrap();

    let prompts = driver.prompts();
    let context_section = prompts[0]
        .split("# Passage to rewrite")
        .next()
        .expect("prompt has a context section");
    assert!(!context_section.contains("A perfectly unique sentence."));
    assert!(prompts[0].contains("# Passage to rewrite (original text)\nA perfectly unique sentence."));
}

#[tokio::test]
async fn rewrite_requires_an_instruction_and_two_segments() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "More."]);
    let err = engine.rewrite("   ").await.unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::EmptyInstruction));

    let (mut engine, _driver, _store) = engine_with(&["Prologue"]);
    let err = engine.rewrite("tighter").await.unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::PrologueRewrite));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn empty_rewrite_is_surfaced_without_retry() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "Original."]);
    driver.push_story(Ok(story("  ", &[])));

    let err = engine.rewrite("tighter").await.unwrap_err();

    assert!(matches!(story_kind(&err), StoryErrorKind::EmptyGeneration));
    assert_eq!(driver.call_count(), 1);
    assert_eq!(engine.session().story_history.last(), Some("Original."));
}

// ----- suggestions and deletion -------------------------------------------

#[tokio::test]
async fn suggest_refreshes_the_cache_without_touching_the_timeline() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "One."]);
    driver.push_suggestions(Ok(vec![
        "a".to_string(),
        "b".to_string(),
        "c".to_string(),
        "overflow".to_string(),
    ]));

    let suggestions = engine.suggest().await.unwrap();

    assert_eq!(suggestions, &["a", "b", "c"]);
    assert_eq!(engine.session().story_history.len(), 2);
}

#[tokio::test]
async fn delete_last_clears_the_cache() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "One.", "Two."]);
    driver.push_suggestions(Ok(vec!["stale".to_string()]));
    engine.suggest().await.unwrap();
    assert!(!engine.suggestions().is_empty());

    engine.delete_last().unwrap();

    assert_eq!(engine.session().story_history.segments(), &["Prologue", "One."]);
    assert!(engine.suggestions().is_empty());
}

#[tokio::test]
async fn delete_last_rejects_a_lone_prologue() {
    let (mut engine, _driver, _store) = engine_with(&["Prologue"]);
    let err = engine.delete_last().unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::NothingToDelete));
}

#[tokio::test]
async fn delete_and_suggest_reports_partial_success() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "One.", "Two."]);
    driver.push_suggestions(Err(network_error().into()));

    let outcome = engine.delete_last_and_suggest().await.unwrap();

    // The deletion stands even though the suggestion fetch failed
    assert!(matches!(outcome, SuggestOutcome::Unavailable(_)));
    assert_eq!(engine.session().story_history.segments(), &["Prologue", "One."]);
    assert!(engine.suggestions().is_empty());
}

#[tokio::test]
async fn delete_and_suggest_uses_the_shortened_timeline() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "One.", "Two."]);
    driver.push_suggestions(Ok(vec!["next".to_string()]));

    let outcome = engine.delete_last_and_suggest().await.unwrap();

    match outcome {
        SuggestOutcome::Refreshed(suggestions) => assert_eq!(suggestions, &["next"]),
        other => panic!("expected a refresh, got {:?}", other),
    }
    let prompts = driver.prompts();
    assert!(prompts[0].contains("One."));
    assert!(!prompts[0].contains("Two."));
}

#[tokio::test]
async fn delete_range_truncates_a_suffix() {
    let (mut engine, _driver, _store) =
        engine_with(&["Prologue", "One.", "Two.", "Three.", "Four."]);

    engine.delete_range(2).unwrap();

    assert_eq!(engine.session().story_history.segments(), &["Prologue", "One."]);
}

#[tokio::test]
async fn clearing_from_the_prologue_requires_the_confirmed_path() {
    let (mut engine, driver, _store) =
        engine_with(&["Prologue", "One.", "Two.", "Three.", "Four."]);
    driver.push_suggestions(Ok(vec!["stale".to_string()]));
    engine.suggest().await.unwrap();

    let err = engine.delete_range(0).unwrap_err();
    assert!(matches!(
        story_kind(&err),
        StoryErrorKind::ClearRequiresConfirmation
    ));
    assert_eq!(engine.session().story_history.len(), 5);

    engine.clear_story().unwrap();
    assert!(engine.session().story_history.is_empty());
    assert!(engine.suggestions().is_empty());
    assert_eq!(
        engine.session().active_tab,
        fabula_story::ActiveView::Settings
    );
}

#[tokio::test]
async fn edit_last_replaces_text_directly() {
    let (mut engine, driver, _store) = engine_with(&["Prologue", "Rough draft."]);

    engine.edit_last("Polished draft.").unwrap();

    assert_eq!(engine.session().story_history.last(), Some("Polished draft."));
    assert_eq!(driver.call_count(), 0);
}

// ----- start and research -------------------------------------------------

#[tokio::test]
async fn start_story_substitutes_the_narrator_placeholder() {
    let (mut engine, _driver, _store) = engine_with(&[]);
    engine.set_prologue("{{char}} counted the bells. {{char}} lost count.");

    engine.start_story().unwrap();

    assert_eq!(
        engine.session().story_history.segments(),
        &["I counted the bells. I lost count."]
    );
    assert_eq!(engine.session().active_tab, fabula_story::ActiveView::Story);
}

#[tokio::test]
async fn start_story_validates_setup() {
    let (mut engine, _driver, _store) = engine_with(&[]);
    engine.set_story_direction("");

    let err = engine.start_story().unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::SetupIncomplete));
    assert!(engine.session().story_history.is_empty());
}

#[tokio::test]
async fn research_combines_character_topics_with_the_source_topic() {
    let (mut engine, driver, _store) = engine_with(&[]);
    engine.set_research_topic(ResearchSlot::Source, "The Drowned Court");
    engine.set_research_topic(ResearchSlot::Character1, "Abel");
    driver.push_research(Ok(ResearchResult::new("- Abel fears bells.", vec![])));

    engine.research(ResearchSlot::Character1).await.unwrap();

    let prompts = driver.prompts();
    assert!(prompts[0].contains("\"Abel (The Drowned Court)\""));
    assert_eq!(
        engine
            .session()
            .research
            .result(ResearchSlot::Character1)
            .unwrap()
            .text,
        "- Abel fears bells."
    );
}

#[tokio::test]
async fn research_requires_a_topic() {
    let (mut engine, driver, _store) = engine_with(&[]);
    let err = engine.research(ResearchSlot::Source).await.unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::EmptyTopic(_)));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn editing_research_keeps_sources() {
    let (mut engine, driver, _store) = engine_with(&[]);
    engine.set_research_topic(ResearchSlot::Source, "The Drowned Court");
    driver.push_research(Ok(ResearchResult::new(
        "- original",
        vec![fabula_core::GroundingSource {
            uri: "https://a".to_string(),
            title: "A".to_string(),
        }],
    )));
    engine.research(ResearchSlot::Source).await.unwrap();

    engine
        .edit_research(ResearchSlot::Source, "- corrected by hand")
        .unwrap();

    let result = engine.session().research.result(ResearchSlot::Source).unwrap();
    assert_eq!(result.text, "- corrected by hand");
    assert_eq!(result.sources.len(), 1);
}

#[tokio::test]
async fn flesh_out_prefers_matching_character_research() {
    let (mut engine, driver, _store) = engine_with(&[]);
    engine.set_research_topic(ResearchSlot::Character1, "Abel of the Drowned Court");
    driver.push_research(Ok(ResearchResult::new("- Abel fears bells.", vec![])));
    engine.research(ResearchSlot::Character1).await.unwrap();

    let id = engine.session().characters.characters()[0].id.clone();
    driver.push_sketch(Ok(CharacterSketch {
        personality: "haunted, deliberate".to_string(),
        ability: String::new(),
    }));
    engine
        .update_character(&id, |c| c.ability = "holds his breath for minutes".to_string())
        .unwrap();

    engine.flesh_out_character(&id).await.unwrap();

    let prompts = driver.prompts();
    assert!(prompts.last().unwrap().contains("- Abel fears bells."));

    let character = engine.session().characters.get(&id).unwrap();
    assert_eq!(character.personality, "haunted, deliberate");
    // An empty sketch field keeps the existing value
    assert_eq!(character.ability, "holds his breath for minutes");
}

#[tokio::test]
async fn roster_keeps_at_least_one_character() {
    let (mut engine, _driver, _store) = engine_with(&[]);
    let first = engine.session().characters.characters()[0].id.clone();

    let added = engine.add_character();
    engine.remove_character(&added).unwrap();

    let err = engine.remove_character(&first).unwrap_err();
    assert!(matches!(story_kind(&err), StoryErrorKind::LastCharacter));
}
