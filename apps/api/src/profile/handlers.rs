//! Axum route handlers for the Profile API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::profile::document::{document_text, DocumentKind};
use crate::profile::{ProfileExtractor, ResumeProfile};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ExtractProfileRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: ResumeProfile,
}

/// POST /api/v1/profile/extract
pub async fn handle_extract_profile(
    State(state): State<AppState>,
    Json(request): Json<ExtractProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let profile = ProfileExtractor::new(state.config.max_skills).extract(&request.resume_text);
    info!(
        "Extracted profile: {} skills, {} years, education {}",
        profile.skills.len(),
        profile.years_experience,
        profile.education_level
    );

    Ok(Json(ProfileResponse { profile }))
}

/// POST /api/v1/profile/upload
///
/// Multipart form with a single `file` field (PDF or plain text).
pub async fn handle_upload_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let kind = DocumentKind::detect(field.file_name(), field.content_type());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        info!("Received {:?} upload ({} bytes)", kind, data.len());

        let text = tokio::task::spawn_blocking(move || document_text(kind, &data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Document decoding task failed: {e}")))?
            .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

        let profile = ProfileExtractor::new(state.config.max_skills).extract(&text);
        return Ok(Json(ProfileResponse { profile }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}
