//! Gemini AI provider implementation.
//!
//! Implements text and image generation against Google's Gemini REST API
//! (`models/{model}:generateContent`).

use super::{
    FinishReason, GenerationParams, ImagePayload, ImageProvider, ImageResponse, ProviderError,
    TextProvider, TextResponse,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: GEMINI_API_BASE.to_string(),
            model: model.into(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Thin HTTP client shared by the text and image providers.
struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the configured model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method,
            self.config.api_key
        )
    }

    async fn generate_content(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let request = build_request(prompt, params);
        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    inner: GeminiClient,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            inner: GeminiClient::new(config)?,
        })
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<TextResponse, ProviderError> {
        let api_response = self.inner.generate_content(prompt, params).await?;
        let response = text_response(api_response);

        if response.finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        Ok(response)
    }
}

/// Gemini image provider (image-capable preview models).
pub struct GeminiImageProvider {
    inner: GeminiClient,
}

impl GeminiImageProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            inner: GeminiClient::new(config)?,
        })
    }
}

#[async_trait]
impl ImageProvider for GeminiImageProvider {
    async fn generate_image(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ImageResponse, ProviderError> {
        let api_response = self.inner.generate_content(prompt, params).await?;
        image_response(api_response)
    }
}

fn build_request(prompt: &str, params: &GenerationParams) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![ContentPart::Text {
                text: prompt.to_string(),
            }],
        }],
        system_instruction: params.system_instruction.as_ref().map(|text| Content {
            role: None,
            parts: vec![ContentPart::Text { text: text.clone() }],
        }),
        generation_config: Some(GenerationConfig {
            temperature: params.temperature,
            max_output_tokens: params.max_tokens,
            response_modalities: if params.response_modalities.is_empty() {
                None
            } else {
                Some(
                    params
                        .response_modalities
                        .iter()
                        .map(|m| m.as_str().to_string())
                        .collect(),
                )
            },
        }),
    }
}

fn finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") => FinishReason::ContentFilter,
        _ => FinishReason::Complete,
    }
}

/// Join every text part of the first candidate.
fn text_response(api_response: GenerateContentResponse) -> TextResponse {
    let candidate = api_response.candidates.into_iter().next();
    let finish_reason = finish_reason(
        candidate
            .as_ref()
            .and_then(|c| c.finish_reason.as_deref()),
    );

    let text: String = candidate
        .map(|c| c.content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| match p {
            ContentPart::Text { text } => Some(text),
            _ => None,
        })
        .collect();

    TextResponse {
        text: if text.is_empty() { None } else { Some(text) },
        finish_reason,
    }
}

fn image_response(api_response: GenerateContentResponse) -> Result<ImageResponse, ProviderError> {
    let Some(candidate) = api_response.candidates.into_iter().next() else {
        return Ok(ImageResponse::default());
    };

    let mut payloads = Vec::with_capacity(candidate.content.parts.len());
    for part in candidate.content.parts {
        match part {
            ContentPart::Text { text } => payloads.push(ImagePayload::Text(text)),
            ContentPart::InlineData { inline_data } => {
                let data = STANDARD.decode(inline_data.data.as_bytes()).map_err(|e| {
                    ProviderError::ApiError(format!("Invalid inline image data: {}", e))
                })?;
                payloads.push(ImagePayload::Image {
                    mime_type: inline_data.mime_type,
                    data,
                });
            }
            ContentPart::Other(_) => {}
        }
    }

    Ok(ImageResponse { payloads })
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default)]
    finish_reason: Option<String>,
}
