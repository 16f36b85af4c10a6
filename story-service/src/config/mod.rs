use crate::services::providers::gemini::GEMINI_API_BASE;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default number of image generation calls allowed per story request.
/// The backend's per-minute budget is shared with the single text call.
const DEFAULT_IMAGE_CALL_BUDGET: usize = 8;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct StoryConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub models: ModelConfig,
    pub generation: GenerationConfig,
    pub cors: CorsConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for the story text (e.g., gemini-2.5-flash)
    pub text_model: String,
    /// Model used for illustrations; must support IMAGE response modality
    pub image_model: String,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub story_temperature: f32,
    pub story_max_tokens: i32,
    pub image_temperature: f32,
    pub image_call_budget: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            story_temperature: 0.8,
            story_max_tokens: 2000,
            image_temperature: 0.7,
            image_call_budget: DEFAULT_IMAGE_CALL_BUDGET,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl StoryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let defaults = GenerationConfig::default();

        Ok(StoryConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: get_env("GEMINI_API_KEY", None, false)?,
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), false)?,
            },
            models: ModelConfig {
                text_model: get_env("STORY_TEXT_MODEL", Some("gemini-2.5-flash"), false)?,
                image_model: get_env(
                    "STORY_IMAGE_MODEL",
                    Some("gemini-2.0-flash-preview-image-generation"),
                    false,
                )?,
            },
            generation: GenerationConfig {
                image_call_budget: parse_call_budget(&get_env(
                    "STORY_IMAGE_CALL_BUDGET",
                    Some(&DEFAULT_IMAGE_CALL_BUDGET.to_string()),
                    false,
                )?)?,
                ..defaults
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_CORS_ORIGINS),
                    false,
                )?),
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_call_budget(raw: &str) -> Result<usize, AppError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        AppError::ConfigError(anyhow::anyhow!("Invalid STORY_IMAGE_CALL_BUDGET '{}': {}", raw, e))
    })
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_origins() {
        let origins = parse_origins(" http://a.test , ,http://b.test");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn default_cors_origins_are_local_dev_servers() {
        let cors = CorsConfig::default();
        assert_eq!(cors.allowed_origins.len(), 3);
        assert!(cors
            .allowed_origins
            .contains(&"http://localhost:5173".to_string()));
    }

    #[test]
    fn call_budget_parses_numbers() {
        assert_eq!(parse_call_budget("5").unwrap(), 5);
        assert_eq!(parse_call_budget(" 0 ").unwrap(), 0);
    }

    #[test]
    fn call_budget_rejects_non_numeric_value() {
        let result = parse_call_budget("eight");
        match result {
            Err(AppError::ConfigError(e)) => {
                assert!(e.to_string().contains("STORY_IMAGE_CALL_BUDGET"))
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn call_budget_rejects_negative_value() {
        assert!(matches!(
            parse_call_budget("-1"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn production_environment_keeps_model_defaults() {
        env::set_var("GEMINI_API_KEY", "test-key");
        env::set_var("ENVIRONMENT", "prod");
        env::remove_var("STORY_TEXT_MODEL");
        env::remove_var("STORY_IMAGE_MODEL");

        let config = StoryConfig::load().unwrap();

        assert_eq!(config.models.text_model, "gemini-2.5-flash");
        assert_eq!(
            config.models.image_model,
            "gemini-2.0-flash-preview-image-generation"
        );
        assert_eq!(config.gemini.api_base, GEMINI_API_BASE);
    }

    #[test]
    fn get_env_rejects_missing_required_key() {
        let result = get_env("STORY_SERVICE_TEST_UNSET_KEY", None, false);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn get_env_falls_back_to_default() {
        let value = get_env("STORY_SERVICE_TEST_UNSET_KEY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }
}
