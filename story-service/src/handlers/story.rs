use crate::models::{StoryRequest, StoryResponse};
use crate::services::StoryError;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// `POST /generate`: write and illustrate an eight-part story.
#[tracing::instrument(skip(state, request), fields(prompt_len = request.prompt.len()))]
pub async fn generate_story(
    State(state): State<AppState>,
    Json(request): Json<StoryRequest>,
) -> Result<Json<StoryResponse>, AppError> {
    request
        .validate()
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Prompt cannot be empty")))?;

    let prompt = request.prompt.as_str();
    tracing::info!(
        prompt = %prompt.chars().take(50).collect::<String>(),
        "Generating story"
    );

    let draft = state.assembler.assemble(prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Unexpected error generating story");
        generation_failed(e)
    })?;

    let parts = state.illustrator.illustrate(&draft.parts, prompt).await;

    Ok(Json(StoryResponse {
        title: draft.title,
        parts,
    }))
}

fn generation_failed(error: StoryError) -> AppError {
    AppError::InternalError(anyhow::anyhow!("Failed to generate story: {}", error))
}
