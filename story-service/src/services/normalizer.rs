//! Coerces free-form text backend output into a structured story.
//!
//! The backend is asked for JSON but frequently wraps it in code fences,
//! emits JavaScript-style `"a" + "b"` concatenations, or ignores the format
//! entirely. Syntax errors fall back to paragraph splitting; well-formed JSON
//! of the wrong shape is reported as a [`ParsingError`].

use crate::models::story::DEFAULT_TITLE;
use crate::models::{ParsedStory, RawStoryPart, StoryDraft, STORY_PARTS};
use crate::services::prompts;
use regex::Regex;
use serde::Deserialize;
use serde_json::error::Category;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to parse story structure: {0}")]
pub struct ParsingError(#[from] serde_json::Error);

static CONCATENATION: OnceLock<Regex> = OnceLock::new();

fn concatenation_pattern() -> &'static Regex {
    CONCATENATION.get_or_init(|| Regex::new(r#""\s*\+\s*""#).expect("concatenation pattern is valid"))
}

#[derive(Debug, Deserialize)]
struct StoryJson {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    parts: Option<Vec<PartJson>>,
}

#[derive(Debug, Deserialize)]
struct PartJson {
    #[serde(default)]
    part_number: Option<serde_json::Value>,
    #[serde(default)]
    content: Option<String>,
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    if text.starts_with("```json") {
        text.replace("```json", "").replace("```", "").trim().to_string()
    } else if text.starts_with("```") {
        text.replace("```", "").trim().to_string()
    } else {
        text.to_string()
    }
}

/// Join `"abc" + "def"` artifacts into a single JSON string.
fn remove_concatenation(text: &str) -> String {
    concatenation_pattern().replace_all(text, "").into_owned()
}

fn into_draft(story: StoryJson) -> StoryDraft {
    let title = story
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let parts = story
        .parts
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let position = i as u32 + 1;
            let part_number = part
                .part_number
                .and_then(|v| v.as_u64())
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(position);
            RawStoryPart::new(part_number, part.content.unwrap_or_default())
        })
        .collect();

    StoryDraft { title, parts }
}

/// Rebuild a story from blank-line separated paragraphs of the raw reply.
fn fallback_story(raw: &str) -> StoryDraft {
    let normalized = raw.replace("\r\n", "\n");
    let mut paragraphs = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let parts = (1..=STORY_PARTS as u32)
        .map(|part_number| {
            let content = paragraphs
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| prompts::fallback_part(part_number));
            RawStoryPart::new(part_number, content)
        })
        .collect();

    StoryDraft {
        title: DEFAULT_TITLE.to_string(),
        parts,
    }
}

/// Normalize a raw text backend reply.
pub fn normalize_response(raw: &str) -> Result<ParsedStory, ParsingError> {
    let cleaned = remove_concatenation(&strip_code_fence(raw));

    tracing::debug!(
        cleaned_prefix = %cleaned.chars().take(200).collect::<String>(),
        "Cleaned story response"
    );

    match serde_json::from_str::<StoryJson>(&cleaned) {
        Ok(story) => Ok(ParsedStory::Structured(into_draft(story))),
        Err(e) if matches!(e.classify(), Category::Syntax | Category::Eof) => {
            tracing::warn!(error = %e, "Story JSON parsing failed, falling back to text parsing");
            Ok(ParsedStory::Fallback(fallback_story(raw)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Unexpected story structure");
            Err(ParsingError(e))
        }
    }
}
