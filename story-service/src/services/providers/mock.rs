//! Mock provider implementations for testing.

use super::{
    FinishReason, GenerationParams, ImagePayload, ImageProvider, ImageResponse, ProviderError,
    TextProvider, TextResponse,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Smallest valid PNG signature, enough for tests that only check prefixes.
pub const MOCK_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Mock text provider returning a fixed reply.
pub struct MockTextProvider {
    reply: Result<String, ProviderError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_result(Ok(text.into()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(reply: Result<String, ProviderError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Canned JSON story with `parts` parts, titled "The Painting Dragon".
    pub fn story_json(parts: usize) -> String {
        let parts: Vec<serde_json::Value> = (1..=parts)
            .map(|n| {
                serde_json::json!({
                    "part_number": n,
                    "content": format!("## Chapter {n}\n\nThe **dragon** paints picture number {n}."),
                })
            })
            .collect();

        serde_json::json!({ "title": "The Painting Dragon", "parts": parts }).to_string()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<TextResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        self.reply.clone().map(|text| TextResponse {
            text: Some(text),
            finish_reason: FinishReason::Complete,
        })
    }
}

/// What a scripted image call should do.
#[derive(Debug, Clone)]
pub enum ImageOutcome {
    /// Return a PNG payload.
    Png,
    /// Return commentary only, no image.
    TextOnly,
    /// Fail with the given error.
    Fail(ProviderError),
}

/// Mock image provider that plays back a script of outcomes, then repeats a
/// default once the script runs out.
pub struct MockImageProvider {
    script: Mutex<VecDeque<ImageOutcome>>,
    default: ImageOutcome,
    calls: AtomicUsize,
}

impl MockImageProvider {
    pub fn always(outcome: ImageOutcome) -> Self {
        Self::scripted(Vec::new(), outcome)
    }

    pub fn scripted(script: Vec<ImageOutcome>, default: ImageOutcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            default,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> ImageOutcome {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| self.default.clone())
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate_image(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ImageResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.next_outcome() {
            ImageOutcome::Png => Ok(ImageResponse {
                payloads: vec![
                    ImagePayload::Text("A cheerful illustration".to_string()),
                    ImagePayload::Image {
                        mime_type: "image/png".to_string(),
                        data: MOCK_PNG.to_vec(),
                    },
                ],
            }),
            ImageOutcome::TextOnly => Ok(ImageResponse {
                payloads: vec![ImagePayload::Text("I could not draw that".to_string())],
            }),
            ImageOutcome::Fail(error) => Err(error),
        }
    }
}
