//! Upskilling plan: one portfolio project and a few resources per skill gap.

use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{ACTIONABLE_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::GenerativeService;
use crate::profile::ResumeProfile;
use crate::reports::normalizer::{SchemaHint, StructuredResponse};
use crate::reports::prompts::{render, UPSKILLING_PROMPT_TEMPLATE, UPSKILLING_SYSTEM};
use crate::reports::{profile_summary, run_report, skill_gaps, UserPreferences};

pub const SCHEMA: SchemaHint = SchemaHint::object(&["skill_gaps", "timeline", "priority_order"]);

/// Gaps considered per plan.
pub const MAX_GAPS: usize = 3;

const FALLBACK_TIMELINE: &str = "3-6 months";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapPlan {
    pub skill: String,
    pub project_idea: String,
    #[serde(default)]
    pub learning_resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpskillingPlan {
    pub skill_gaps: Vec<SkillGapPlan>,
    pub timeline: String,
    pub priority_order: String,
}

pub fn build_prompt(
    profile: &ResumeProfile,
    preferences: &UserPreferences,
    in_demand: &[String],
    gaps: &[String],
) -> String {
    render(
        UPSKILLING_PROMPT_TEMPLATE,
        &[
            ("profile", profile_summary(profile, preferences).as_str()),
            ("in_demand_skills", list_or_none(in_demand).as_str()),
            ("skill_gaps", list_or_none(gaps).as_str()),
            ("instructions", ACTIONABLE_INSTRUCTION),
        ],
    )
}

/// Generic plan covering each gap with a search-based course link.
pub fn fallback(gaps: &[String]) -> UpskillingPlan {
    let skill_gaps = gaps
        .iter()
        .map(|skill| SkillGapPlan {
            skill: skill.clone(),
            project_idea: format!("Build a small end-to-end project that uses {skill}"),
            learning_resources: vec![LearningResource {
                name: format!("{skill} Fundamentals Course"),
                url: course_search_url(skill),
                kind: "course".to_string(),
            }],
        })
        .collect();

    UpskillingPlan {
        skill_gaps,
        timeline: FALLBACK_TIMELINE.to_string(),
        priority_order: if gaps.is_empty() {
            "No skill gaps identified".to_string()
        } else {
            gaps.join(", ")
        },
    }
}

pub async fn generate_upskilling_plan(
    llm: &dyn GenerativeService,
    profile: &ResumeProfile,
    preferences: &UserPreferences,
    in_demand: &[String],
) -> StructuredResponse<UpskillingPlan> {
    let gaps = skill_gaps(profile, in_demand, MAX_GAPS);
    let prompt = build_prompt(profile, preferences, in_demand, &gaps);
    let system = format!("{UPSKILLING_SYSTEM} {JSON_ONLY_SYSTEM}");
    run_report(llm, "upskilling", &prompt, &system, &SCHEMA, |_| fallback(&gaps)).await
}

fn course_search_url(skill: &str) -> String {
    let query: String = skill
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '+' })
        .collect();
    format!("https://www.coursera.org/search?query={query}")
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none provided".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::extract_profile;
    use crate::reports::testing::CannedService;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fallback_covers_each_gap() {
        let plan = fallback(&strings(&["Kubernetes", "Machine Learning"]));
        assert_eq!(plan.skill_gaps.len(), 2);
        assert_eq!(plan.timeline, "3-6 months");
        assert_eq!(plan.priority_order, "Kubernetes, Machine Learning");
        let resource = &plan.skill_gaps[1].learning_resources[0];
        assert_eq!(resource.kind, "course");
        assert_eq!(
            resource.url,
            "https://www.coursera.org/search?query=Machine+Learning"
        );
    }

    #[test]
    fn test_fallback_without_gaps() {
        let plan = fallback(&[]);
        assert!(plan.skill_gaps.is_empty());
        assert_eq!(plan.priority_order, "No skill gaps identified");
    }

    #[test]
    fn test_prompt_lists_gaps() {
        let profile = extract_profile("python");
        let demand = strings(&["Python", "Airflow"]);
        let prompt = build_prompt(&profile, &UserPreferences::default(), &demand, &strings(&["Airflow"]));
        assert!(prompt.contains("In-demand skills in their industry: Python, Airflow"));
        assert!(prompt.contains("Identified skill gaps: Airflow"));
    }

    #[test]
    fn test_resource_type_field_name() {
        let json = r#"{"name": "Docs", "url": "https://example.org", "type": "documentation"}"#;
        let resource: LearningResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.kind, "documentation");
        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(back["type"], "documentation");
    }

    #[tokio::test]
    async fn test_valid_reply_is_ok() {
        let reply = r#"{
            "skill_gaps": [{
                "skill": "Terraform",
                "project_idea": "Provision a staging stack",
                "learning_resources": [{"name": "HashiCorp Learn", "url": "https://developer.hashicorp.com", "type": "documentation"}]
            }],
            "timeline": "8 weeks",
            "priority_order": "Terraform first"
        }"#;
        let llm = CannedService::replying(reply);
        let profile = extract_profile("aws and docker");
        let response = generate_upskilling_plan(
            &llm,
            &profile,
            &UserPreferences::default(),
            &strings(&["Terraform"]),
        )
        .await;
        assert!(!response.is_fallback());
        assert_eq!(response.value().timeline, "8 weeks");
    }

    #[tokio::test]
    async fn test_service_failure_uses_first_three_gaps() {
        let llm = CannedService::failing();
        let profile = extract_profile("python and sql");
        let demand = strings(&["Python", "Spark", "Airflow", "dbt", "Kafka"]);
        let response =
            generate_upskilling_plan(&llm, &profile, &UserPreferences::default(), &demand).await;
        assert!(response.is_fallback());
        let skills: Vec<&str> = response
            .value()
            .skill_gaps
            .iter()
            .map(|g| g.skill.as_str())
            .collect();
        assert_eq!(skills, vec!["Spark", "Airflow", "dbt"]);
    }
}
