//! Market intelligence report.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{ACTIONABLE_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::GenerativeService;
use crate::profile::ResumeProfile;
use crate::reports::normalizer::{SchemaHint, StructuredResponse};
use crate::reports::prompts::{render, INTELLIGENCE_PROMPT_TEMPLATE, INTELLIGENCE_SYSTEM};
use crate::reports::{profile_summary, run_report, UserPreferences};

pub const SCHEMA: SchemaHint = SchemaHint::object(&[
    "market_intelligence_summary",
    "key_industry_skills",
    "macroeconomic_shifts",
    "salary_insights",
    "growth_opportunities",
]);

const UNAVAILABLE_SUMMARY: &str = "Unable to generate market intelligence at this time";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceReport {
    pub market_intelligence_summary: String,
    pub key_industry_skills: Vec<String>,
    pub macroeconomic_shifts: String,
    pub salary_insights: String,
    pub growth_opportunities: String,
}

pub fn build_prompt(profile: &ResumeProfile, preferences: &UserPreferences) -> String {
    render(
        INTELLIGENCE_PROMPT_TEMPLATE,
        &[
            ("profile", profile_summary(profile, preferences).as_str()),
            ("instructions", ACTIONABLE_INSTRUCTION),
        ],
    )
}

/// Placeholder report. Unstructured model prose is still worth showing, so it
/// becomes the summary.
pub fn fallback(profile: &ResumeProfile, raw_text: &str) -> IntelligenceReport {
    let summary = raw_text.trim();
    IntelligenceReport {
        market_intelligence_summary: if summary.is_empty() {
            UNAVAILABLE_SUMMARY.to_string()
        } else {
            summary.to_string()
        },
        key_industry_skills: profile.skills.iter().take(5).cloned().collect(),
        macroeconomic_shifts: "Analysis provided in summary".to_string(),
        salary_insights: "Contact for detailed salary information".to_string(),
        growth_opportunities: "See market intelligence summary".to_string(),
    }
}

pub async fn generate_intelligence_report(
    llm: &dyn GenerativeService,
    profile: &ResumeProfile,
    preferences: &UserPreferences,
) -> StructuredResponse<IntelligenceReport> {
    let prompt = build_prompt(profile, preferences);
    let system = format!("{INTELLIGENCE_SYSTEM} {JSON_ONLY_SYSTEM}");
    run_report(llm, "intelligence", &prompt, &system, &SCHEMA, |raw| {
        fallback(profile, raw)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::extract_profile;
    use crate::reports::testing::CannedService;

    const VALID_REPLY: &str = r#"Here you go:
```json
{
  "market_intelligence_summary": "Rust adoption keeps growing in infrastructure.",
  "key_industry_skills": ["Rust", "Kubernetes"],
  "macroeconomic_shifts": "Memory-safety guidance from regulators.",
  "salary_insights": "Senior roles 150k-200k USD.",
  "growth_opportunities": "Platform engineering."
}
```"#;

    #[test]
    fn test_prompt_embeds_profile() {
        let profile = extract_profile("Senior Rust engineer");
        let prompt = build_prompt(&profile, &UserPreferences::default());
        assert!(prompt.contains("- Skills: Rust"));
        assert!(prompt.contains("\"salary_insights\""));
        assert!(!prompt.contains("{profile}"));
        assert!(!prompt.contains("{instructions}"));
    }

    #[test]
    fn test_fallback_echoes_prose_and_top_skills() {
        let profile = extract_profile("python java rust docker aws kubernetes");
        let report = fallback(&profile, "  Markets are volatile.  ");
        assert_eq!(report.market_intelligence_summary, "Markets are volatile.");
        assert_eq!(report.key_industry_skills.len(), 5);
    }

    #[test]
    fn test_fallback_without_text() {
        let report = fallback(&ResumeProfile::default(), "");
        assert_eq!(report.market_intelligence_summary, UNAVAILABLE_SUMMARY);
        assert!(report.key_industry_skills.is_empty());
    }

    #[tokio::test]
    async fn test_recovers_json_wrapped_in_prose_and_fence() {
        let llm = CannedService::replying(VALID_REPLY);
        let profile = extract_profile("rust");
        let response =
            generate_intelligence_report(&llm, &profile, &UserPreferences::default()).await;
        assert!(!response.is_fallback());
        assert_eq!(response.value().key_industry_skills, vec!["Rust", "Kubernetes"]);
    }

    #[tokio::test]
    async fn test_incomplete_reply_falls_back() {
        let llm = CannedService::replying(r#"{"market_intelligence_summary": "only this"}"#);
        let profile = extract_profile("rust");
        let response =
            generate_intelligence_report(&llm, &profile, &UserPreferences::default()).await;
        assert!(response.is_fallback());
        assert_eq!(response.value().key_industry_skills, vec!["Rust"]);
    }
}
