use crate::config::clamp_testimonial_count;
use crate::models::{GenerateTestimonialsResponse, Testimonial};
use crate::services::testimonials::{TestimonialGenerator, SCENARIOS, TESTIMONIALS_KEY};
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

#[tracing::instrument(skip(state))]
pub async fn generate_testimonials(
    State(state): State<AppState>,
) -> Result<Json<GenerateTestimonialsResponse>, AppError> {
    let provider = state.provider.clone().ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!(
            "OpenAI client is not configured. Check API key."
        ))
    })?;

    let generator = TestimonialGenerator::new(
        provider,
        &state.config.profile.developer_name,
        &state.config.profile.developer_role,
    );
    let count = clamp_testimonial_count(state.config.testimonials.count);
    let testimonials = generator.generate_all(&SCENARIOS[..count]).await;

    if testimonials.is_empty() {
        tracing::error!("No testimonials were generated");
        return Err(AppError::InternalError(anyhow::anyhow!(
            "Failed to generate any testimonials."
        )));
    }

    let document = serde_json::to_value(&testimonials)?;
    state
        .store
        .put(TESTIMONIALS_KEY, &document)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to store testimonials");
            AppError::StorageError(anyhow::anyhow!("Failed to store testimonials: {}", e))
        })?;

    tracing::info!(
        count = testimonials.len(),
        storage_key = TESTIMONIALS_KEY,
        "Stored testimonials"
    );

    Ok(Json(GenerateTestimonialsResponse {
        message: "Testimonials generated and stored successfully.".to_string(),
        testimonial_count: testimonials.len(),
        storage_key: TESTIMONIALS_KEY.to_string(),
    }))
}

pub async fn view_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let Some(document) = state.store.get(TESTIMONIALS_KEY).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to retrieve testimonials");
        AppError::StorageError(anyhow::anyhow!("Failed to retrieve testimonials: {}", e))
    })?
    else {
        tracing::info!(
            storage_key = TESTIMONIALS_KEY,
            "No testimonials stored yet, returning empty list"
        );
        return Ok(Json(Vec::new()));
    };

    let testimonials: Vec<Testimonial> = serde_json::from_value(document).map_err(|e| {
        tracing::error!(error = %e, "Stored testimonials have an unexpected shape");
        AppError::InternalError(anyhow::anyhow!("Failed to retrieve testimonials: {}", e))
    })?;

    Ok(Json(testimonials))
}
