//! Static keyword tables used by the profile extractor.
//!
//! All entries are lower-case; matching is plain substring containment over the
//! lower-cased résumé text, so order here is also the order in which skills
//! are admitted under the skill cap.

pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "spring",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "graphql",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "git",
    "jenkins",
    "linux",
    "devops",
    "ci/cd",
    "microservices",
    "machine learning",
    "ai",
    "data science",
    "data analysis",
    "tableau",
    "excel",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "problem solving",
    "critical thinking",
    "teamwork",
    "collaboration",
    "project management",
    "time management",
    "stakeholder management",
    "strategic planning",
    "mentoring",
    "negotiation",
    "adaptability",
    "public speaking",
];

/// Title fragments. Only the fragment is captured, never the full title.
pub const JOB_TITLE_KEYWORDS: &[&str] = &[
    "senior",
    "junior",
    "lead",
    "principal",
    "staff",
    "head",
    "chief",
    "director",
    "manager",
    "engineer",
    "developer",
    "architect",
    "analyst",
    "scientist",
    "consultant",
    "designer",
    "specialist",
    "coordinator",
    "administrator",
    "intern",
];

/// Industry name paired with the keywords that indicate it.
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &["software", "tech", "programming", "coding", "development", "engineering"],
    ),
    (
        "Finance",
        &["finance", "banking", "investment", "accounting", "trading", "financial"],
    ),
    (
        "Healthcare",
        &["healthcare", "medical", "nursing", "hospital", "pharmaceutical", "biotech"],
    ),
    (
        "Education",
        &["education", "teaching", "academic", "university", "school", "learning"],
    ),
    (
        "Marketing",
        &["marketing", "advertising", "brand", "digital marketing", "social media"],
    ),
    (
        "Consulting",
        &["consulting", "advisory", "strategy", "management consulting"],
    ),
    (
        "Retail",
        &["retail", "e-commerce", "sales", "customer service", "merchandising"],
    ),
    (
        "Manufacturing",
        &["manufacturing", "production", "operations", "supply chain", "logistics"],
    ),
];

/// Degree patterns per education tier, highest tier first.
///
/// Matched case-insensitively on word boundaries: bare abbreviations such as
/// `ms` or `ba` would otherwise fire inside ordinary words.
pub const PHD_PATTERNS: &str = r"(?i)\b(?:ph\.?\s?d|doctorate|doctoral|doctor of)\b";
pub const MASTERS_PATTERNS: &str =
    r"(?i)\b(?:master(?:'?s)?\s+(?:of|in|degree)|masters|mba|m\.b\.a|msc|m\.sc|m\.s|m\.a|ms\s+(?:in|of)|ma\s+(?:in|of)|m\.eng|meng|mfa)\b";
pub const BACHELORS_PATTERNS: &str =
    r"(?i)\b(?:bachelor(?:'?s)?|b\.?sc|b\.s|b\.a|b\.eng|beng|bs|ba|undergraduate degree)\b";
pub const ASSOCIATE_PATTERNS: &str =
    r"(?i)\b(?:associate(?:'?s)?\s+(?:of|in|degree)|diploma|certificate|certification|certified)\b";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_are_lowercase() {
        let all = TECHNICAL_SKILLS
            .iter()
            .chain(SOFT_SKILLS)
            .chain(JOB_TITLE_KEYWORDS)
            .chain(INDUSTRY_KEYWORDS.iter().flat_map(|(_, kws)| kws.iter()));
        for kw in all {
            assert_eq!(*kw, kw.to_lowercase(), "vocabulary entry '{kw}' must be lower-case");
        }
    }

    #[test]
    fn test_skill_vocabularies_have_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for kw in TECHNICAL_SKILLS.iter().chain(SOFT_SKILLS) {
            assert!(seen.insert(*kw), "duplicate skill '{kw}'");
        }
    }
}
