//! Settings import/export tests: round trip, defaults for absent
//! fields, the legacy research fallback, and validation failures.

use fabula_core::{Character, GroundingSource, ResearchResult, StoryLength, StoryModel};
use fabula_error::{FabulaErrorKind, SettingsErrorKind};
use fabula_story::{SessionState, export_file_name, export_settings, import_settings};

fn populated_session() -> SessionState {
    let mut state = SessionState::default();
    state.story_direction = "a forgery ring unravels".to_string();
    state.story_length = StoryLength::Long;
    state.prologue = "The brushstrokes were wrong.".to_string();
    state.selected_model = StoryModel::Pro;
    state.history_lookback_count = 7;
    state.thinking_budget = 1024;

    let id = state.characters.characters()[0].id.clone();
    state
        .characters
        .update(&id, |c| {
            c.name = "Vesna".to_string();
            c.personality = "exacting".to_string();
        })
        .unwrap();

    state.research.research_source_result = Some(ResearchResult::new(
        "- The gallery burned twice.",
        vec![GroundingSource {
            uri: "https://example.com/gallery".to_string(),
            title: "Gallery fires".to_string(),
        }],
    ));

    state.story_history.start("The brushstrokes were wrong.");
    state.story_history.append("Nobody else noticed.");
    state
}

fn settings_kind(err: &fabula_error::FabulaError) -> &SettingsErrorKind {
    match err.kind() {
        FabulaErrorKind::Settings(e) => &e.kind,
        other => panic!("expected a settings error, got {:?}", other),
    }
}

#[test]
fn round_trip_reproduces_every_settings_field() {
    let original = populated_session();
    let json = export_settings(&original).unwrap();

    let mut imported = SessionState::default();
    import_settings(&mut imported, &json).unwrap();

    assert_eq!(imported.story_direction, original.story_direction);
    assert_eq!(imported.story_length, original.story_length);
    assert_eq!(
        imported.characters.characters(),
        original.characters.characters()
    );
    assert_eq!(imported.prologue, original.prologue);
    assert_eq!(
        imported.research.research_source_result,
        original.research.research_source_result
    );
    assert_eq!(imported.selected_model, original.selected_model);
    assert_eq!(
        imported.history_lookback_count,
        original.history_lookback_count
    );
    assert_eq!(imported.thinking_budget, original.thinking_budget);
}

#[test]
fn import_leaves_the_story_history_untouched() {
    let exported = export_settings(&populated_session()).unwrap();

    let mut target = SessionState::default();
    target.story_history.start("An unrelated story in progress.");
    import_settings(&mut target, &exported).unwrap();

    assert_eq!(
        target.story_history.segments(),
        &["An unrelated story in progress."]
    );
}

#[test]
fn absent_optional_fields_fall_back_to_defaults() {
    let minimal = r#"{
        "storyDirection": "spare",
        "characters": [],
        "prologue": "Begin."
    }"#;

    let mut state = SessionState::default();
    state.story_length = StoryLength::Long;
    state.thinking_budget = 9999;
    import_settings(&mut state, minimal).unwrap();

    assert_eq!(state.story_length, StoryLength::Normal);
    assert_eq!(state.selected_model, StoryModel::Flash);
    assert_eq!(state.history_lookback_count, 4);
    assert_eq!(state.thinking_budget, 0);
    // An empty cast falls back to the single blank character
    assert_eq!(state.characters.len(), 1);
}

#[test]
fn legacy_single_slot_research_feeds_character_slot_one() {
    let legacy = r#"{
        "storyDirection": "spare",
        "characters": [],
        "prologue": "Begin.",
        "researchCharacterResult": { "text": "- legacy notes", "sources": [] }
    }"#;

    let mut state = SessionState::default();
    import_settings(&mut state, legacy).unwrap();

    assert_eq!(
        state
            .research
            .research_character_result1
            .as_ref()
            .map(|r| r.text.as_str()),
        Some("- legacy notes")
    );
}

#[test]
fn the_modern_slot_outranks_the_legacy_field() {
    let both = r#"{
        "storyDirection": "spare",
        "characters": [],
        "prologue": "Begin.",
        "researchCharacterResult": { "text": "- legacy", "sources": [] },
        "researchCharacterResult1": { "text": "- modern", "sources": [] }
    }"#;

    let mut state = SessionState::default();
    import_settings(&mut state, both).unwrap();

    assert_eq!(
        state
            .research
            .research_character_result1
            .as_ref()
            .map(|r| r.text.as_str()),
        Some("- modern")
    );
}

#[test]
fn missing_required_fields_are_reported_by_name() {
    let mut state = SessionState::default();

    let err = import_settings(
        &mut state,
        r#"{ "characters": [], "prologue": "Begin." }"#,
    )
    .unwrap_err();
    assert!(matches!(
        settings_kind(&err),
        SettingsErrorKind::MissingField("storyDirection")
    ));

    let err = import_settings(
        &mut state,
        r#"{ "storyDirection": "d", "prologue": "Begin." }"#,
    )
    .unwrap_err();
    assert!(matches!(
        settings_kind(&err),
        SettingsErrorKind::MissingField("characters")
    ));

    let err = import_settings(
        &mut state,
        r#"{ "storyDirection": "d", "characters": [] }"#,
    )
    .unwrap_err();
    assert!(matches!(
        settings_kind(&err),
        SettingsErrorKind::MissingField("prologue")
    ));
}

#[test]
fn malformed_payloads_fail_as_parse_errors() {
    let mut state = SessionState::default();

    let err = import_settings(&mut state, "{ not json").unwrap_err();
    assert!(matches!(settings_kind(&err), SettingsErrorKind::Parse(_)));

    // A mistyped characters field is a parse failure, not a silent default
    let err = import_settings(
        &mut state,
        r#"{ "storyDirection": "d", "characters": "not a list", "prologue": "p" }"#,
    )
    .unwrap_err();
    assert!(matches!(settings_kind(&err), SettingsErrorKind::Parse(_)));
}

#[test]
fn a_failed_import_does_not_clobber_prior_settings() {
    let mut state = populated_session();
    let direction = state.story_direction.clone();

    let err = import_settings(&mut state, "{ not json").unwrap_err();
    assert!(matches!(settings_kind(&err), SettingsErrorKind::Parse(_)));
    assert_eq!(state.story_direction, direction);
}

#[test]
fn exported_json_uses_the_camel_case_wire_format() {
    let json = export_settings(&populated_session()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value.get("storyDirection").is_some());
    assert!(value.get("historyLookbackCount").is_some());
    assert!(value.get("researchSourceResult").is_some());
    assert_eq!(value["selectedModel"], "gemini-2.5-pro");
    assert_eq!(value["storyLength"], "long");
    assert_eq!(value["characters"][0]["name"], "Vesna");
    // The story itself is not part of the settings file
    assert!(value.get("storyHistory").is_none());
}

#[test]
fn characters_survive_the_wire_format_bit_for_bit() {
    let mut character = Character::new("Rook");
    character.gender = "unspecified".to_string();
    character.age = "late forties".to_string();
    character.free_text = "walks with a cane he does not need".to_string();
    character.is_original = false;

    let json = serde_json::to_string(&character).unwrap();
    let back: Character = serde_json::from_str(&json).unwrap();
    assert_eq!(back, character);
}

#[test]
fn export_file_names_carry_prefix_and_extension() {
    let name = export_file_name("fabula-settings", "json");
    assert!(name.starts_with("fabula-settings_"));
    assert!(name.ends_with(".json"));
    // prefix + '_' + yymmdd-HHMM + '.json'
    assert_eq!(name.len(), "fabula-settings_".len() + 11 + ".json".len());
}
