//! Story request, intermediate and response models.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Number of parts every generated story is coerced into.
pub const STORY_PARTS: usize = 8;

/// Title used when the backend does not supply one.
pub const DEFAULT_TITLE: &str = "A Magical Adventure";

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoryRequest {
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        let mut err = ValidationError::new("blank_prompt");
        err.message = Some("Prompt cannot be empty".into());
        return Err(err);
    }
    Ok(())
}

/// One part of the story text as produced by the text backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStoryPart {
    /// 1-based position within the story.
    pub part_number: u32,

    /// Markdown-flavored text (`##` headers, `**bold**`).
    pub content: String,
}

impl RawStoryPart {
    pub fn new(part_number: u32, content: impl Into<String>) -> Self {
        Self {
            part_number,
            content: content.into(),
        }
    }
}

/// Text-only story before illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    pub title: String,
    pub parts: Vec<RawStoryPart>,
}

/// Normalized backend output, tagged with how it was obtained.
///
/// Both variants carry the same shape so downstream code never branches on
/// the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedStory {
    /// The backend returned well-formed JSON.
    Structured(StoryDraft),
    /// JSON parsing failed and the story was rebuilt from paragraphs.
    Fallback(StoryDraft),
}

impl ParsedStory {
    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedStory::Structured(_))
    }

    pub fn into_draft(self) -> StoryDraft {
        match self {
            ParsedStory::Structured(draft) | ParsedStory::Fallback(draft) => draft,
        }
    }
}

/// An illustrated story part returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPart {
    pub text: String,

    /// `data:image/png;base64,...` or `data:image/svg+xml;base64,...`
    pub image: String,
}

/// Body of a successful `POST /generate` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    pub title: String,
    pub parts: Vec<StoryPart>,
}
