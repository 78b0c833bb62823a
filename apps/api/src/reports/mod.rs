// AI career reports.
// Every report follows the same path: profile → prompt → GenerativeService →
// normalizer. Each call site owns its schema and its fallback value.

pub mod handlers;
pub mod intelligence;
pub mod normalizer;
pub mod prompts;
pub mod recommendations;
pub mod training;
pub mod upskilling;

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::GenerativeService;
use crate::profile::ResumeProfile;
use crate::reports::normalizer::{normalize, SchemaHint, StructuredResponse};

/// Characters of source résumé text quoted into prompts.
const EXCERPT_CHARS: usize = 1500;

/// Optional user preferences layered on top of the extracted profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub desired_roles: Vec<String>,
    pub location: Option<String>,
    pub target_industry: Option<String>,
}

/// Sends `prompt` to the model and normalizes the reply.
///
/// `fallback` receives the model's raw text (empty when the call itself failed)
/// so call sites can echo it into a placeholder.
pub async fn run_report<T, F>(
    llm: &dyn GenerativeService,
    report: &str,
    prompt: &str,
    system: &str,
    hint: &SchemaHint,
    fallback: F,
) -> StructuredResponse<T>
where
    T: DeserializeOwned,
    F: FnOnce(&str) -> T,
{
    info!("Generating {report} report with {}", llm.model());

    let response = match llm.generate(prompt, system).await {
        Ok(raw) => normalize(&raw, hint, || fallback(&raw)),
        Err(e) => {
            warn!("{report} report: generative service call failed: {e}");
            StructuredResponse::fallback(
                fallback(""),
                format!("generative service call failed: {e}"),
            )
        }
    };

    if let Some(reason) = response.reason() {
        info!("{report} report served from fallback ({reason})");
    }
    response
}

/// Renders the profile and preferences as the plain-text block every prompt embeds.
pub fn profile_summary(profile: &ResumeProfile, preferences: &UserPreferences) -> String {
    let desired_roles = if preferences.desired_roles.is_empty() {
        profile.suggested_roles()
    } else {
        preferences.desired_roles.clone()
    };

    let mut lines = vec![
        format!("- Skills: {}", join_or_none(profile.skills.iter())),
        format!("- Job titles: {}", join_or_none(profile.job_titles.iter())),
        format!("- Years of experience: {}", describe_years(profile.years_experience)),
        format!("- Education: {}", profile.education_level),
        format!("- Industries: {}", join_or_none(profile.industries.iter())),
        format!("- Desired roles: {}", join_or_none(desired_roles.iter())),
    ];
    if let Some(location) = &preferences.location {
        lines.push(format!("- Preferred location: {location}"));
    }
    if let Some(industry) = &preferences.target_industry {
        lines.push(format!("- Target industry: {industry}"));
    }
    let excerpt: String = profile.raw_text.trim().chars().take(EXCERPT_CHARS).collect();
    if !excerpt.is_empty() {
        lines.push(format!("- Résumé excerpt:\n{excerpt}"));
    }
    lines.join("\n")
}

/// In-demand skills the profile lacks, case-insensitively, in request order.
pub fn skill_gaps(profile: &ResumeProfile, in_demand: &[String], limit: usize) -> Vec<String> {
    let have: HashSet<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();
    let mut seen = HashSet::new();
    in_demand
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| !have.contains(&s.to_lowercase()))
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let joined = items.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none listed".to_string()
    } else {
        joined
    }
}

fn describe_years(years: u32) -> String {
    match years {
        0 => "unknown".to_string(),
        1 => "1 year".to_string(),
        n => format!("{n} years"),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CannedService;
    use super::*;
    use crate::profile::extract_profile;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skill_gaps_case_insensitive_in_order() {
        let profile = extract_profile("python and docker");
        let demand = strings(&["Docker", "Kubernetes", "PYTHON", "Terraform", "Go", "Rust"]);
        assert_eq!(skill_gaps(&profile, &demand, 3), strings(&["Kubernetes", "Terraform", "Go"]));
    }

    #[test]
    fn test_skill_gaps_dedupes_and_skips_blank() {
        let profile = ResumeProfile::default();
        let demand = strings(&["  ", "SQL", "sql", "Airflow"]);
        assert_eq!(skill_gaps(&profile, &demand, 5), strings(&["SQL", "Airflow"]));
    }

    #[test]
    fn test_profile_summary_uses_suggested_roles_without_preferences() {
        let profile = extract_profile("rust developer");
        let summary = profile_summary(&profile, &UserPreferences::default());
        assert!(summary.contains("- Skills: Rust"));
        assert!(summary.contains("- Desired roles: Rust Specialist"));
        assert!(summary.contains("- Years of experience: unknown"));
        assert!(!summary.contains("Preferred location"));
        assert!(summary.ends_with("- Résumé excerpt:\nrust developer"));
    }

    #[test]
    fn test_profile_summary_excerpt_is_bounded() {
        let profile = extract_profile(&"ß".repeat(EXCERPT_CHARS + 10));
        let summary = profile_summary(&profile, &UserPreferences::default());
        assert_eq!(summary.matches('ß').count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_profile_summary_prefers_user_roles() {
        let prefs = UserPreferences {
            desired_roles: strings(&["Platform Engineer"]),
            location: Some("Berlin".to_string()),
            target_industry: None,
        };
        let summary = profile_summary(&ResumeProfile::default(), &prefs);
        assert!(summary.contains("- Desired roles: Platform Engineer"));
        assert!(summary.contains("- Preferred location: Berlin"));
        assert!(summary.contains("- Skills: none listed"));
    }

    #[tokio::test]
    async fn test_run_report_ok() {
        let llm = CannedService::replying("```json\n[\"A\", \"B\"]\n```");
        let response: StructuredResponse<Vec<String>> =
            run_report(&llm, "test", "p", "s", &SchemaHint::array(), |_| vec![]).await;
        assert_eq!(response, StructuredResponse::Ok { value: strings(&["A", "B"]) });
    }

    #[tokio::test]
    async fn test_run_report_service_failure_falls_back() {
        let llm = CannedService::failing();
        let response: StructuredResponse<Vec<String>> =
            run_report(&llm, "test", "p", "s", &SchemaHint::array(), |raw| {
                assert!(raw.is_empty());
                strings(&["placeholder"])
            })
            .await;
        assert_eq!(response.value(), &strings(&["placeholder"]));
        assert!(response
            .reason()
            .unwrap()
            .starts_with("generative service call failed"));
    }

    #[tokio::test]
    async fn test_run_report_passes_raw_text_to_fallback() {
        let llm = CannedService::replying("no structure here");
        let response: StructuredResponse<Vec<String>> =
            run_report(&llm, "test", "p", "s", &SchemaHint::array(), |raw| {
                vec![raw.to_string()]
            })
            .await;
        assert!(response.is_fallback());
        assert_eq!(response.value(), &strings(&["no structure here"]));
    }
}
