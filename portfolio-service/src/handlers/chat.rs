use crate::models::{ChatRequest, ChatResponse};
use crate::services::profile;
use crate::services::providers::{ChatMessage, GenerationParams};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Room for a detailed answer; lower temperature keeps it factual.
const CHAT_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 250,
    temperature: 0.5,
};

const UNCONFIGURED_MESSAGE: &str =
    "Chatbot service is currently unavailable due to a configuration error.";
const FALLBACK_ANSWER: &str = "I'm sorry, I couldn't generate a response at this moment.";

#[tracing::instrument(skip(state, request))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let provider = state.provider.clone().ok_or_else(|| {
        tracing::error!("Completion client not initialized; OPENAI_API_KEY might be missing");
        AppError::ConfigError(anyhow::anyhow!(UNCONFIGURED_MESSAGE))
    })?;

    tracing::info!(
        question = %request.question,
        session_id = request.session_id.as_deref().unwrap_or("N/A"),
        "Received chat question"
    );

    let messages = [
        ChatMessage::system(profile::chat_system_prompt()),
        ChatMessage::user(request.question),
    ];

    let completion = provider
        .complete(&messages, &CHAT_PARAMS)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error communicating with completion API");
            AppError::ServiceUnavailable(format!("Error processing chat message: {}", e))
        })?;

    let answer = completion
        .text
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

    tracing::info!(
        model = %provider.model(),
        output_tokens = completion.output_tokens,
        "Chat answer generated"
    );

    Ok(Json(ChatResponse {
        answer,
        session_id: request.session_id,
    }))
}
