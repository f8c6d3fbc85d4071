//! Prompt assembly for continuation, rewrite, suggestion, research, and
//! character-completion calls.
//!
//! Every builder here is a pure function over its inputs. Section
//! structure is kept stable across calls: absent research and character
//! detail render as explicit markers instead of vanishing, so the
//! generator always sees the same prompt shape.

use crate::research::ResearchKind;
use fabula_core::{Character, ResearchResult, StoryLength};

/// Lookback value treated as "effectively unlimited".
///
/// No real story history approaches this many segments, so configuring
/// it disables windowing in practice.
pub const UNLIMITED_LOOKBACK: usize = 1000;

/// Inputs shared by the continuation and rewrite builders.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    /// Overall direction of the story
    pub direction: &'a str,
    /// Advisory segment length class
    pub length: StoryLength,
    /// The cast, narrator first
    pub characters: &'a [Character],
    /// Research slots: source, character 1, character 2
    pub research: [Option<&'a ResearchResult>; 3],
    /// Story segments providing context, oldest first
    pub history: &'a [String],
    /// Number of trailing history segments to include
    pub lookback: usize,
}

/// The trailing window of history the generator is allowed to see.
///
/// Returns the whole history when it fits inside `lookback`.
fn windowed(history: &[String], lookback: usize) -> &[String] {
    if history.len() > lookback {
        &history[history.len() - lookback..]
    } else {
        history
    }
}

/// One compact roster line per character, detail clauses only when
/// non-empty.
fn render_characters(characters: &[Character]) -> String {
    characters
        .iter()
        .map(|character| {
            let mut details = Vec::new();
            if !character.free_text.is_empty() {
                details.push(format!("notes: {}", character.free_text));
            }
            if !character.personality.is_empty() {
                details.push(format!("personality: {}", character.personality));
            }
            if !character.ability.is_empty() {
                details.push(format!("ability: {}", character.ability));
            }
            if details.is_empty() {
                format!("- {}", character.name)
            } else {
                format!("- {}: {}", character.name, details.join("; "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_marker(text: &str, marker: &str) -> String {
    if text.is_empty() {
        marker.to_string()
    } else {
        text.to_string()
    }
}

fn research_text(research: Option<&ResearchResult>) -> String {
    research
        .map(|result| result.text.clone())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "None".to_string())
}

/// The shared setting block: direction, cast, and the three research
/// slots.
fn render_setting(ctx: &PromptContext<'_>, include_direction: bool) -> String {
    let mut setting = String::from("# Setting\n");
    if include_direction {
        setting.push_str(&format!(
            "## Direction\n{}\n\n",
            or_marker(ctx.direction, "Unspecified")
        ));
    }
    setting.push_str(&format!(
        "## Characters\n{}\n\n",
        or_marker(&render_characters(ctx.characters), "Unspecified")
    ));
    setting.push_str(&format!(
        "## Reference (source material)\n{}\n\n",
        research_text(ctx.research[0])
    ));
    setting.push_str(&format!(
        "## Reference (character 1)\n{}\n\n",
        research_text(ctx.research[1])
    ));
    setting.push_str(&format!(
        "## Reference (character 2)\n{}",
        research_text(ctx.research[2])
    ));
    setting
}

/// Build the prompt for a continuation call.
///
/// With a `directive` the generator is told to depict it as the
/// immediate next scene; otherwise it continues freely within the
/// established setting. The `retry` clause asks for a softened second
/// attempt after an empty response.
pub fn build_continuation_prompt(
    ctx: &PromptContext<'_>,
    directive: Option<&str>,
    retry: bool,
) -> String {
    let recent = windowed(ctx.history, ctx.lookback);

    let mut prompt = format!(
        "Write as a professional novelist, narrating in the first person as the \
         protagonist (\"I\"). Produce roughly {} characters of narrative prose \
         only. Let the descriptions reflect how the characters have changed.\n\
         \n\
         # Rules\n\
         - Insert line breaks for readability, with one blank line between paragraphs.\n\
         - Do not close on a conjectural sentence form, and avoid phrasing that \
         lets the reader anticipate the next development.\n\
         - End in a way that keeps the story going.\n\
         \n\
         {}\n\
         \n\
         # The story so far\n\
         {}\n",
        ctx.length.target_chars(),
        render_setting(ctx, true),
        or_marker(&recent.join("\n\n"), "The story begins here."),
    );

    match directive {
        Some(directive) => prompt.push_str(&format!(
            "\n# The next scene\n\
             As the scene immediately following \"the story so far\", depict in \
             detail the events given in the instruction below.\n\
             ## Instruction\n{}",
            directive
        )),
        None => prompt.push_str(
            "\n# The next scene\n\
             Continue \"the story so far\" in a natural flow, free of \
             contradictions with the setting.",
        ),
    }

    if retry {
        prompt.push_str(
            "\n\n# Additional instruction\n\
             Important: the previous attempt returned an empty response, likely \
             because of the model's safety standards. To get past this, shift \
             the development slightly and write the story in more moderate, \
             creative terms.",
        );
    }

    prompt.push_str(
        "\n\nFinally, propose three intriguing ideas for how the story could \
         continue beyond what you have just written.",
    );

    prompt
}

/// Build the prompt for a rewrite call.
///
/// `ctx.history` is expected to already exclude the segment being
/// rewritten.
pub fn build_rewrite_prompt(
    ctx: &PromptContext<'_>,
    original: &str,
    instruction: &str,
) -> String {
    let recent = windowed(ctx.history, ctx.lookback);

    format!(
        "Rewrite the target passage as a professional editor, following the \
         instruction and honoring the setting and context below.\n\
         \n\
         {}\n\
         \n\
         # The story so far (context)\n\
         {}\n\
         \n\
         # Passage to rewrite (original text)\n\
         {}\n\
         \n\
         # Revision instruction\n\
         {}\n\
         \n\
         # Rules\n\
         - Preserve the plot of the story, except where the instruction asks \
         for a change.\n\
         - Keep each character's personality and manner of speech exactly as \
         established.\n\
         - Insert line breaks in the rewritten text, with one blank line \
         between paragraphs.\n\
         - Do not close on a past-tense or conjectural sentence form; end on a \
         depiction of the present moment.\n\
         - Output JSON of the shape {{story: string, suggestions: string[]}}.\n",
        render_setting(ctx, false),
        or_marker(&recent.join("\n\n"), "(no context)"),
        original,
        instruction,
    )
}

/// Build the prompt for a suggestions-only call.
pub fn build_suggestion_prompt(history: &[String], lookback: usize) -> String {
    let recent = windowed(history, lookback);

    format!(
        "Concisely propose three intriguing developments that could continue \
         the story below.\n\
         \n\
         # The story so far\n\
         {}\n\
         \n\
         # Proposals\n",
        recent.join("\n\n"),
    )
}

/// Build the prompt for a search-grounded research call.
pub fn build_research_prompt(topic: &str, kind: ResearchKind) -> String {
    let focus = match kind {
        ResearchKind::Source => "the work",
        ResearchKind::Character => "the character",
    };

    format!(
        "You are an AI that condenses information. Summarize the topic below \
         for a downstream AI that will read the result directly.\n\
         \n\
         # Instructions\n\
         - Keep to the core of the story as it concerns {}: plot, character \
         motivations, world-building.\n\
         - State facts only, as bullet points.\n\
         - Include no preamble along the lines of \"the following is \
         about...\", no commentary, and no closing remarks.\n\
         - Begin the output with the first bullet point.\n\
         \n\
         # Topic\n\
         \"{}\"",
        focus, topic,
    )
}

/// Build the prompt for a character completion call.
pub fn build_character_prompt(character: &Character, reference: Option<&str>) -> String {
    format!(
        "Flesh out the character's personality and abilities in detail, based \
         on the information below.\n\
         \n\
         # Input\n\
         - Name: {}\n\
         - Gender: {}\n\
         - Age: {}\n\
         \n\
         # Reference\n\
         {}\n\
         \n\
         # Output\n\
         Integrate the above and fill in the requested JSON fields.\n",
        or_marker(&character.name, "Unspecified"),
        or_marker(&character.gender, "Unspecified"),
        or_marker(&character.age, "Unspecified"),
        reference.filter(|text| !text.is_empty()).unwrap_or("None"),
    )
}
