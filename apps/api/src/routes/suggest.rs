use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::MAX_PROMPT_CHARS;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub text: String,
}

/// POST /api/v1/suggest
/// Returns AI-written text for a résumé or cover-letter field.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("AI suggestions are not configured".to_string()))?;

    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(AppError::Validation(format!(
            "prompt must be at most {MAX_PROMPT_CHARS} characters"
        )));
    }

    let text = llm.suggest(prompt).await?;
    Ok(Json(SuggestResponse { text }))
}
