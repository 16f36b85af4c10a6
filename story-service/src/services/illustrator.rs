//! Illustration of story parts with placeholder fallback.
//!
//! Parts are illustrated one at a time. The first quota error flips a sticky
//! flag in the loop accumulator and every later part goes straight to the
//! placeholder generator without touching the backend.

use crate::config::GenerationConfig;
use crate::models::{RawStoryPart, StoryPart};
use crate::services::placeholder::placeholder_image;
use crate::services::prompts;
use crate::services::providers::{GenerationParams, ImageProvider, Modality};
use crate::services::quota::is_quota_exhausted;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Loop state threaded through one request's illustration pass.
#[derive(Debug, Default)]
struct IllustrationState {
    parts: Vec<StoryPart>,
    calls: usize,
    exhausted: bool,
}

#[derive(Clone)]
pub struct Illustrator {
    image_provider: Arc<dyn ImageProvider>,
    temperature: f32,
    call_budget: usize,
}

impl Illustrator {
    pub fn new(image_provider: Arc<dyn ImageProvider>, generation: &GenerationConfig) -> Self {
        Self {
            image_provider,
            temperature: generation.image_temperature,
            call_budget: generation.image_call_budget,
        }
    }

    /// Pair every part with an image data URI. Never fails: backend problems
    /// degrade to placeholders.
    #[tracing::instrument(skip(self, parts), fields(parts = parts.len()))]
    pub async fn illustrate(&self, parts: &[RawStoryPart], theme: &str) -> Vec<StoryPart> {
        let state = stream::iter(parts.iter().enumerate())
            .fold(
                IllustrationState {
                    parts: Vec::with_capacity(parts.len()),
                    ..Default::default()
                },
                move |mut state, (i, part)| async move {
                    let part_number = i as u32 + 1;
                    let image = self.image_for_part(&mut state, part, part_number, theme).await;
                    state.parts.push(StoryPart {
                        text: part.content.clone(),
                        image,
                    });
                    state
                },
            )
            .await;

        let real_images = state
            .parts
            .iter()
            .filter(|p| p.image.starts_with(PNG_DATA_URI_PREFIX))
            .count();

        tracing::info!(
            parts = state.parts.len(),
            real_images,
            placeholders = state.parts.len() - real_images,
            backend_calls = state.calls,
            quota_exhausted = state.exhausted,
            "Illustrated story parts"
        );

        state.parts
    }

    async fn image_for_part(
        &self,
        state: &mut IllustrationState,
        part: &RawStoryPart,
        part_number: u32,
        theme: &str,
    ) -> String {
        let placeholder = || placeholder_image(part_number as usize);

        if state.exhausted {
            tracing::info!(part_number, "Skipping image generation due to quota exhaustion");
            return placeholder();
        }

        if state.calls >= self.call_budget {
            tracing::info!(
                part_number,
                budget = self.call_budget,
                "Image call budget spent, using placeholder"
            );
            return placeholder();
        }

        let scene = prompts::scene_description(&part.content);
        let prompt = prompts::illustration_prompt(part_number, theme, &scene);
        let params = GenerationParams {
            temperature: Some(self.temperature),
            response_modalities: vec![Modality::Text, Modality::Image],
            ..Default::default()
        };

        tracing::info!(part_number, "Generating image");
        state.calls += 1;

        match self.image_provider.generate_image(&prompt, &params).await {
            Ok(response) => {
                for text in response.commentary() {
                    tracing::debug!(
                        part_number,
                        commentary = %text.chars().take(100).collect::<String>(),
                        "Image commentary"
                    );
                }

                match response.first_image() {
                    Some((mime_type, bytes)) => {
                        tracing::info!(
                            part_number,
                            mime_type,
                            bytes = bytes.len(),
                            "Generated image"
                        );
                        format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(bytes))
                    }
                    None => {
                        tracing::warn!(part_number, "No image data found in response");
                        placeholder()
                    }
                }
            }
            Err(e) if is_quota_exhausted(&e) => {
                tracing::warn!(
                    part_number,
                    error = %e,
                    "API quota exhausted - will use placeholders for remaining images"
                );
                state.exhausted = true;
                placeholder()
            }
            Err(e) => {
                tracing::error!(part_number, error = %e, "Error generating image");
                placeholder()
            }
        }
    }
}
