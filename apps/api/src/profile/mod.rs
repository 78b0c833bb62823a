//! Résumé profile extraction: deterministic lexical signals over raw résumé text.
//!
//! Skills, job titles and industries use plain substring containment against the
//! static tables in `vocabulary` (so "ai" also hits inside "paint"). Education
//! level is tiered, highest tier first. Years of experience come from
//! `experience::resolve_years`.

pub mod document;
pub mod experience;
pub mod handlers;
pub mod vocabulary;

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::profile::vocabulary::{
    ASSOCIATE_PATTERNS, BACHELORS_PATTERNS, INDUSTRY_KEYWORDS, JOB_TITLE_KEYWORDS,
    MASTERS_PATTERNS, PHD_PATTERNS, SOFT_SKILLS, TECHNICAL_SKILLS,
};

pub const DEFAULT_MAX_SKILLS: usize = 20;

/// Highest education level found in a résumé.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    #[default]
    Unknown,
    AssociateOrCertificate,
    Bachelors,
    Masters,
    PhD,
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EducationLevel::Unknown => "Unknown",
            EducationLevel::AssociateOrCertificate => "Associate or Certificate",
            EducationLevel::Bachelors => "Bachelor's",
            EducationLevel::Masters => "Master's",
            EducationLevel::PhD => "PhD",
        };
        f.write_str(label)
    }
}

/// Structured output of résumé extraction. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub job_titles: BTreeSet<String>,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub education_level: EducationLevel,
    #[serde(default)]
    pub industries: BTreeSet<String>,
    /// Source text; quoted into report prompts, never serialized.
    #[serde(default, skip_serializing)]
    pub raw_text: String,
}

impl ResumeProfile {
    /// "<Skill> Specialist" for the first three skills; used when the user gave
    /// no desired roles.
    pub fn suggested_roles(&self) -> Vec<String> {
        self.skills
            .iter()
            .take(3)
            .map(|skill| format!("{skill} Specialist"))
            .collect()
    }
}

// Tiers in priority order; the first tier with a hit wins.
static EDUCATION_TIERS: Lazy<Vec<(EducationLevel, Regex)>> = Lazy::new(|| {
    [
        (EducationLevel::PhD, PHD_PATTERNS),
        (EducationLevel::Masters, MASTERS_PATTERNS),
        (EducationLevel::Bachelors, BACHELORS_PATTERNS),
        (EducationLevel::AssociateOrCertificate, ASSOCIATE_PATTERNS),
    ]
    .into_iter()
    .map(|(level, pattern)| {
        (
            level,
            Regex::new(pattern).expect("education tier pattern is valid"),
        )
    })
    .collect()
});

/// Extracts profiles with a configurable skill cap.
#[derive(Debug, Clone, Copy)]
pub struct ProfileExtractor {
    pub max_skills: usize,
}

impl Default for ProfileExtractor {
    fn default() -> Self {
        Self {
            max_skills: DEFAULT_MAX_SKILLS,
        }
    }
}

impl ProfileExtractor {
    pub fn new(max_skills: usize) -> Self {
        Self { max_skills }
    }

    /// Builds a profile from raw résumé text. Empty input yields an empty profile.
    pub fn extract(&self, text: &str) -> ResumeProfile {
        if text.trim().is_empty() {
            return ResumeProfile {
                raw_text: text.to_string(),
                ..ResumeProfile::default()
            };
        }

        let lower = text.to_lowercase();
        let profile = ResumeProfile {
            skills: detect_skills(&lower, self.max_skills),
            job_titles: detect_keywords(&lower, JOB_TITLE_KEYWORDS),
            years_experience: experience::resolve_years(text),
            education_level: detect_education_level(text),
            industries: detect_industries(&lower),
            raw_text: text.to_string(),
        };

        tracing::debug!(
            skills = profile.skills.len(),
            job_titles = profile.job_titles.len(),
            industries = profile.industries.len(),
            years = profile.years_experience,
            education = %profile.education_level,
            "profile extracted"
        );

        profile
    }
}

/// Extracts a profile using the default skill cap.
pub fn extract_profile(text: &str) -> ResumeProfile {
    ProfileExtractor::default().extract(text)
}

/// Technical skills first, then soft skills, stopping once `max` are collected.
fn detect_skills(lower: &str, max: usize) -> BTreeSet<String> {
    TECHNICAL_SKILLS
        .iter()
        .chain(SOFT_SKILLS)
        .filter(|skill| lower.contains(**skill))
        .take(max)
        .map(|skill| title_case(skill))
        .collect()
}

fn detect_keywords(lower: &str, vocabulary: &[&str]) -> BTreeSet<String> {
    vocabulary
        .iter()
        .filter(|kw| lower.contains(**kw))
        .map(|kw| title_case(kw))
        .collect()
}

fn detect_industries(lower: &str) -> BTreeSet<String> {
    INDUSTRY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(industry, _)| industry.to_string())
        .collect()
}

fn detect_education_level(text: &str) -> EducationLevel {
    EDUCATION_TIERS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(level, _)| *level)
        .unwrap_or_default()
}

/// Upper-cases the first letter of every alphabetic run: "node.js" → "Node.Js",
/// "ci/cd" → "Ci/Cd", "c++" → "C++".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
