//! Job title recommendations.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::GenerativeService;
use crate::profile::ResumeProfile;
use crate::reports::normalizer::{SchemaHint, StructuredResponse};
use crate::reports::prompts::{render, RECOMMENDATIONS_PROMPT_TEMPLATE, RECOMMENDATIONS_SYSTEM};
use crate::reports::{profile_summary, run_report, UserPreferences};

pub const SCHEMA: SchemaHint = SchemaHint::array();

pub const DEFAULT_TITLES: &[&str] = &[
    "Software Engineer",
    "Data Analyst",
    "Product Manager",
    "DevOps Engineer",
    "UX Designer",
];

pub fn build_prompt(profile: &ResumeProfile, preferences: &UserPreferences) -> String {
    render(
        RECOMMENDATIONS_PROMPT_TEMPLATE,
        &[("profile", profile_summary(profile, preferences).as_str())],
    )
}

pub fn fallback() -> Vec<String> {
    DEFAULT_TITLES.iter().map(|t| t.to_string()).collect()
}

pub async fn recommend_job_titles(
    llm: &dyn GenerativeService,
    profile: &ResumeProfile,
    preferences: &UserPreferences,
) -> StructuredResponse<Vec<String>> {
    let prompt = build_prompt(profile, preferences);
    let system = format!("{RECOMMENDATIONS_SYSTEM} {JSON_ONLY_SYSTEM}");
    let mut response =
        run_report(llm, "recommendations", &prompt, &system, &SCHEMA, |_| fallback()).await;

    if let StructuredResponse::Ok { value } = &mut response {
        value.retain(|title| !title.trim().is_empty());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::CannedService;

    #[tokio::test]
    async fn test_titles_recovered_from_prose() {
        let llm = CannedService::replying(
            "Based on the profile:\n[\"Backend Engineer\", \"\", \"Site Reliability Engineer\"]",
        );
        let response =
            recommend_job_titles(&llm, &ResumeProfile::default(), &UserPreferences::default())
                .await;
        assert!(!response.is_fallback());
        assert_eq!(
            response.into_value(),
            vec!["Backend Engineer", "Site Reliability Engineer"]
        );
    }

    #[tokio::test]
    async fn test_object_reply_falls_back_to_defaults() {
        let llm = CannedService::replying(r#"{"titles": "Backend Engineer"}"#);
        let response =
            recommend_job_titles(&llm, &ResumeProfile::default(), &UserPreferences::default())
                .await;
        assert!(response.is_fallback());
        assert_eq!(response.value().len(), 5);
        assert_eq!(response.value()[0], "Software Engineer");
    }

    #[tokio::test]
    async fn test_non_string_items_fall_back() {
        let llm = CannedService::replying("[1, 2, 3]");
        let response =
            recommend_job_titles(&llm, &ResumeProfile::default(), &UserPreferences::default())
                .await;
        assert!(response.reason().unwrap().contains("schema mismatch"));
        assert_eq!(response.into_value(), fallback());
    }
}
