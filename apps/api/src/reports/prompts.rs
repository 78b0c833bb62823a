// Prompt templates for the report call sites.
// Placeholders in braces are filled by `render` before sending.

/// Market intelligence. Replace `{profile}`.
pub const INTELLIGENCE_SYSTEM: &str = "You are a Senior Career Intelligence Analyst with expertise \
    in market trends, industry analysis, and career development.";

pub const INTELLIGENCE_PROMPT_TEMPLATE: &str = r#"Analyze the following user profile and provide comprehensive career intelligence.

User Profile:
{profile}

Return a JSON object with this EXACT schema:
{
  "market_intelligence_summary": "Recent trends, funding news, and notable companies in the user's primary industry",
  "key_industry_skills": ["skill1", "skill2", "skill3", "skill4", "skill5"],
  "macroeconomic_shifts": "Significant regulations, laws, or market forces impacting this industry/role",
  "salary_insights": "Current salary ranges and compensation trends",
  "growth_opportunities": "Emerging roles and career advancement paths"
}

{instructions}"#;

/// Upskilling plan. Replace `{profile}`, `{in_demand_skills}`, `{skill_gaps}`.
pub const UPSKILLING_SYSTEM: &str =
    "You are an expert career development coach and learning strategist.";

pub const UPSKILLING_PROMPT_TEMPLATE: &str = r#"User Profile:
{profile}

In-demand skills in their industry: {in_demand_skills}
Identified skill gaps: {skill_gaps}

For each skill gap, provide:
1. A personalized project idea that builds a portfolio
2. 1-2 specific online resources or tutorials (courses, documentation, blogs)

Return a JSON object with this EXACT schema:
{
  "skill_gaps": [
    {
      "skill": "skill_name",
      "project_idea": "Detailed project description",
      "learning_resources": [
        {"name": "Resource name", "url": "Resource URL", "type": "course|documentation|blog|video"}
      ]
    }
  ],
  "timeline": "Estimated timeline for completing the upskilling plan",
  "priority_order": "Recommended order to tackle these skills"
}

{instructions}"#;

/// Job title recommendations. Replace `{profile}`.
pub const RECOMMENDATIONS_SYSTEM: &str =
    "You are a career advisor who matches candidates to job titles.";

pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = r#"Based on this user profile, suggest 5 job titles that would be a good fit.

User Profile:
{profile}

Return only the job titles as a JSON array, like: ["Job Title 1", "Job Title 2", ...]"#;

/// Training plan. Replace `{profile}`, `{target_role}`, `{skill_gaps}`.
pub const TRAINING_SYSTEM: &str =
    "You are a technical training planner who designs structured learning programs.";

pub const TRAINING_PROMPT_TEMPLATE: &str = r#"Design a training plan that prepares this candidate for the role of {target_role}.

User Profile:
{profile}

Skills to develop: {skill_gaps}

Return a JSON object with this EXACT schema:
{
  "target_role": "{target_role}",
  "phases": [
    {
      "name": "Phase name",
      "duration": "e.g. 4 weeks",
      "focus_skills": ["skill"],
      "activities": ["Concrete activity"]
    }
  ],
  "total_duration": "Overall duration",
  "success_metrics": ["How the candidate knows they are ready"]
}

{instructions}"#;

/// Fills `{name}` placeholders in one pass. Substituted values are never
/// rescanned, so braces inside résumé text or request fields stay literal.
/// Unknown placeholders are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = vars.iter().find_map(|(name, value)| {
            after
                .strip_prefix(name)
                .and_then(|r| r.strip_prefix('}'))
                .map(|r| (*value, r))
        });
        match hit {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_every_occurrence() {
        let out = render("{a} and {b}, again {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and y, again x");
    }

    #[test]
    fn test_render_does_not_expand_inside_values() {
        let out = render(
            "role {target_role}\n{profile}\n{instructions}",
            &[
                ("profile", "likes {target_role} and {instructions}"),
                ("target_role", "SRE"),
                ("instructions", "be brief"),
            ],
        );
        assert_eq!(out, "role SRE\nlikes {target_role} and {instructions}\nbe brief");
    }

    #[test]
    fn test_render_keeps_json_braces_and_unknown_names() {
        let out = render("{\n  \"k\": \"{v}\" {missing} {", &[("v", "1")]);
        assert_eq!(out, "{\n  \"k\": \"1\" {missing} {");
    }
}
