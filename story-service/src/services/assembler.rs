//! Story text generation: one backend call, normalized to exactly
//! [`STORY_PARTS`] parts.

use crate::config::GenerationConfig;
use crate::models::{RawStoryPart, StoryDraft, STORY_PARTS};
use crate::services::normalizer::normalize_response;
use crate::services::prompts;
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::StoryError;
use std::sync::Arc;

#[derive(Clone)]
pub struct StoryAssembler {
    text_provider: Arc<dyn TextProvider>,
    temperature: f32,
    max_tokens: i32,
}

impl StoryAssembler {
    pub fn new(text_provider: Arc<dyn TextProvider>, generation: &GenerationConfig) -> Self {
        Self {
            text_provider,
            temperature: generation.story_temperature,
            max_tokens: generation.story_max_tokens,
        }
    }

    /// Ask the text backend for a story about `prompt` and shape it into
    /// exactly eight parts. No retries.
    #[tracing::instrument(skip(self), fields(prompt_len = prompt.len()))]
    pub async fn assemble(&self, prompt: &str) -> Result<StoryDraft, StoryError> {
        let params = GenerationParams {
            system_instruction: Some(prompts::STORY_SYSTEM_INSTRUCTION.to_string()),
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            ..Default::default()
        };

        let response = self
            .text_provider
            .generate(&prompts::story_prompt(prompt), &params)
            .await?;
        let raw = response.text.ok_or(StoryError::EmptyResponse)?;

        let parsed = normalize_response(&raw)?;
        let structured = parsed.is_structured();
        let mut draft = parsed.into_draft();

        if draft.parts.is_empty() {
            return Err(StoryError::EmptyStory);
        }

        draft.parts = ensure_story_parts(draft.parts);

        tracing::info!(
            title = %draft.title,
            parts = draft.parts.len(),
            structured,
            "Generated story text"
        );

        Ok(draft)
    }
}

/// Pad with continuation filler or truncate so exactly [`STORY_PARTS`] remain.
/// Blank parts are replaced with filler too.
pub fn ensure_story_parts(mut parts: Vec<RawStoryPart>) -> Vec<RawStoryPart> {
    if parts.len() != STORY_PARTS {
        tracing::warn!(
            generated = parts.len(),
            expected = STORY_PARTS,
            "Story part count mismatch"
        );
    }

    parts.truncate(STORY_PARTS);
    while parts.len() < STORY_PARTS {
        let part_number = parts.len() as u32 + 1;
        parts.push(RawStoryPart::new(
            part_number,
            prompts::continuation_part(part_number),
        ));
    }

    for (i, part) in parts.iter_mut().enumerate() {
        if part.content.trim().is_empty() {
            part.content = prompts::continuation_part(i as u32 + 1);
        }
    }

    parts
}
