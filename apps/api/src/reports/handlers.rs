//! Axum route handlers for the Reports API.
//!
//! Every report endpoint answers 200 once the profile resolves, including when
//! the model reply could not be used; the `status` tag on `report` says which.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::{ProfileExtractor, ResumeProfile};
use crate::reports::intelligence::{generate_intelligence_report, IntelligenceReport};
use crate::reports::normalizer::StructuredResponse;
use crate::reports::recommendations::recommend_job_titles;
use crate::reports::training::{generate_training_plan, TrainingPlan};
use crate::reports::upskilling::{generate_upskilling_plan, UpskillingPlan};
use crate::reports::UserPreferences;
use crate::state::AppState;

/// Request body shared by all report endpoints.
///
/// `resume_text` wins over `profile` when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    pub resume_text: Option<String>,
    pub profile: Option<ResumeProfile>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub in_demand_skills: Vec<String>,
    pub target_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse<T> {
    pub request_id: Uuid,
    pub report: StructuredResponse<T>,
}

impl<T> ReportResponse<T> {
    fn new(kind: &str, report: StructuredResponse<T>) -> Json<Self> {
        let request_id = Uuid::new_v4();
        info!(%request_id, fallback = report.is_fallback(), "{kind} report ready");
        Json(Self { request_id, report })
    }
}

impl ReportRequest {
    fn resolve_profile(&self, max_skills: usize) -> Result<ResumeProfile, AppError> {
        if let Some(text) = self.resume_text.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(ProfileExtractor::new(max_skills).extract(text));
        }
        self.profile.clone().ok_or_else(|| {
            AppError::Validation("either resume_text or profile is required".to_string())
        })
    }
}

/// POST /api/v1/reports/intelligence
pub async fn handle_intelligence(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse<IntelligenceReport>>, AppError> {
    let profile = request.resolve_profile(state.config.max_skills)?;
    let report =
        generate_intelligence_report(state.llm.as_ref(), &profile, &request.preferences).await;
    Ok(ReportResponse::new("intelligence", report))
}

/// POST /api/v1/reports/upskilling
pub async fn handle_upskilling(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse<UpskillingPlan>>, AppError> {
    let profile = request.resolve_profile(state.config.max_skills)?;
    let report = generate_upskilling_plan(
        state.llm.as_ref(),
        &profile,
        &request.preferences,
        &request.in_demand_skills,
    )
    .await;
    Ok(ReportResponse::new("upskilling", report))
}

/// POST /api/v1/reports/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse<Vec<String>>>, AppError> {
    let profile = request.resolve_profile(state.config.max_skills)?;
    let report = recommend_job_titles(state.llm.as_ref(), &profile, &request.preferences).await;
    info!("Recommended {} job titles", report.value().len());
    Ok(ReportResponse::new("recommendations", report))
}

/// POST /api/v1/reports/training
pub async fn handle_training(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse<TrainingPlan>>, AppError> {
    let profile = request.resolve_profile(state.config.max_skills)?;
    let report = generate_training_plan(
        state.llm.as_ref(),
        &profile,
        &request.preferences,
        &request.in_demand_skills,
        request.target_role.as_deref(),
    )
    .await;
    info!("Training plan targets '{}'", report.value().target_role);
    Ok(ReportResponse::new("training", report))
}
