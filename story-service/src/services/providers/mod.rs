//! AI provider abstractions and implementations.
//!
//! The story pipeline only needs two capabilities from the generative backend:
//! text completion and image generation. Both are expressed as traits so the
//! Gemini client can be swapped for scripted mocks in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Result of a text generation call.
#[derive(Debug, Clone)]
pub struct TextResponse {
    /// Concatenated text of the first candidate, if any.
    pub text: Option<String>,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// A single payload returned by an image generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Commentary the model emitted alongside (or instead of) the image.
    Text(String),

    /// Raw image bytes.
    Image { mime_type: String, data: Vec<u8> },
}

/// Result of an image generation call. May contain zero images.
#[derive(Debug, Clone, Default)]
pub struct ImageResponse {
    pub payloads: Vec<ImagePayload>,
}

impl ImageResponse {
    /// First inline image in the response, with its MIME type.
    pub fn first_image(&self) -> Option<(&str, &[u8])> {
        self.payloads.iter().find_map(|p| match p {
            ImagePayload::Image { mime_type, data } if !data.is_empty() => {
                Some((mime_type.as_str(), data.as_slice()))
            }
            _ => None,
        })
    }

    /// Text commentary, in order.
    pub fn commentary(&self) -> impl Iterator<Item = &str> {
        self.payloads.iter().filter_map(|p| match p {
            ImagePayload::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Output modalities an image request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "TEXT",
            Modality::Image => "IMAGE",
        }
    }
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// System instruction prepended to the conversation.
    pub system_instruction: Option<String>,

    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,

    /// Requested response modalities (image generation only).
    pub response_modalities: Vec<Modality>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text completion for the prompt.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<TextResponse, ProviderError>;
}

/// Trait for image generation providers (e.g., Gemini image preview models).
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate an image (and optional commentary) for the prompt.
    async fn generate_image(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ImageResponse, ProviderError>;
}
