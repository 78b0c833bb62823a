//! Phased training plan toward a target role.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{ACTIONABLE_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::GenerativeService;
use crate::profile::ResumeProfile;
use crate::reports::normalizer::{SchemaHint, StructuredResponse};
use crate::reports::prompts::{render, TRAINING_PROMPT_TEMPLATE, TRAINING_SYSTEM};
use crate::reports::{profile_summary, run_report, skill_gaps, UserPreferences};

pub const SCHEMA: SchemaHint =
    SchemaHint::object(&["target_role", "phases", "total_duration", "success_metrics"]);

const MAX_FOCUS_SKILLS: usize = 5;
const DEFAULT_ROLE: &str = "your next role";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPhase {
    pub name: String,
    pub duration: String,
    #[serde(default)]
    pub focus_skills: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub target_role: String,
    pub phases: Vec<TrainingPhase>,
    pub total_duration: String,
    pub success_metrics: Vec<String>,
}

/// Explicit role, then the first desired role, then the first suggested one.
pub fn resolve_target_role(
    explicit: Option<&str>,
    profile: &ResumeProfile,
    preferences: &UserPreferences,
) -> String {
    explicit
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .or_else(|| preferences.desired_roles.first().cloned())
        .or_else(|| profile.suggested_roles().into_iter().next())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

pub fn build_prompt(
    profile: &ResumeProfile,
    preferences: &UserPreferences,
    target_role: &str,
    gaps: &[String],
) -> String {
    let gaps = if gaps.is_empty() {
        "none identified".to_string()
    } else {
        gaps.join(", ")
    };
    render(
        TRAINING_PROMPT_TEMPLATE,
        &[
            ("profile", profile_summary(profile, preferences).as_str()),
            ("target_role", target_role),
            ("skill_gaps", gaps.as_str()),
            ("instructions", ACTIONABLE_INSTRUCTION),
        ],
    )
}

pub fn fallback(target_role: &str, profile: &ResumeProfile, gaps: &[String]) -> TrainingPlan {
    let existing: Vec<String> = profile.skills.iter().take(3).cloned().collect();

    TrainingPlan {
        target_role: target_role.to_string(),
        phases: vec![
            TrainingPhase {
                name: "Foundations".to_string(),
                duration: "4 weeks".to_string(),
                focus_skills: gaps.to_vec(),
                activities: vec![
                    "Complete an introductory course for each focus skill".to_string(),
                    "Read the official documentation end to end".to_string(),
                ],
            },
            TrainingPhase {
                name: "Applied Practice".to_string(),
                duration: "6 weeks".to_string(),
                focus_skills: gaps.iter().chain(existing.iter()).cloned().collect(),
                activities: vec![
                    "Build a project that combines new and existing skills".to_string(),
                    "Contribute a fix to an open-source project".to_string(),
                ],
            },
            TrainingPhase {
                name: "Portfolio & Interview Prep".to_string(),
                duration: "2 weeks".to_string(),
                focus_skills: existing,
                activities: vec![
                    format!("Tailor the résumé toward {target_role}"),
                    "Practice mock interviews".to_string(),
                ],
            },
        ],
        total_duration: "12 weeks".to_string(),
        success_metrics: vec![
            "One portfolio project per focus skill".to_string(),
            format!("Able to discuss {target_role} responsibilities with confidence"),
        ],
    }
}

pub async fn generate_training_plan(
    llm: &dyn GenerativeService,
    profile: &ResumeProfile,
    preferences: &UserPreferences,
    in_demand: &[String],
    target_role: Option<&str>,
) -> StructuredResponse<TrainingPlan> {
    let role = resolve_target_role(target_role, profile, preferences);
    let gaps = skill_gaps(profile, in_demand, MAX_FOCUS_SKILLS);
    let prompt = build_prompt(profile, preferences, &role, &gaps);
    let system = format!("{TRAINING_SYSTEM} {JSON_ONLY_SYSTEM}");
    run_report(llm, "training", &prompt, &system, &SCHEMA, |_| {
        fallback(&role, profile, &gaps)
    })
    .await
}
