//! Years-of-experience inference.
//!
//! Strategies run in order and the first one that yields a value wins:
//! 1. an explicit statement ("5 years of experience", "experience: 7 years", ...)
//! 2. the aggregate of date spans mined before the Education section
//! 3. the most recently started span, when the aggregate breaks the sanity ceiling
//!
//! Nothing matched means 0 (unknown).

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Earliest start year a span may carry.
pub const MIN_SPAN_YEAR: i32 = 1950;
/// Aggregates above this many years are treated as spurious date matches.
pub const SANITY_CEILING_YEARS: u32 = 50;

/// A candidate period of employment. Only built through `ExperienceSpan::new`,
/// which enforces `MIN_SPAN_YEAR <= start <= end <= current_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceSpan {
    pub start_year: i32,
    pub end_year: i32,
}

impl ExperienceSpan {
    pub fn new(start_year: i32, end_year: i32, current_year: i32) -> Option<Self> {
        let valid =
            start_year >= MIN_SPAN_YEAR && start_year <= end_year && end_year <= current_year;
        valid.then_some(Self {
            start_year,
            end_year,
        })
    }

    pub fn years(&self) -> u32 {
        (self.end_year - self.start_year) as u32
    }
}

/// A single inference layer: `(text, current_year) -> years`.
pub type Strategy = fn(&str, i32) -> Option<u32>;

/// Ordered strategy chain. Each layer is independently callable.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("explicit_statement", explicit_statement),
    ("span_aggregate", span_aggregate),
    ("most_recent_span", most_recent_span),
];

static EXPLICIT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+(?:of\s+)?experience",
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+(?:in|of)\s+\w",
        r"(?i)\bexperience\s*:\s*(\d{1,2})\+?\s*(?:years?|yrs?)",
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+(?:of\s+)?(?:professional|work|industry)",
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+(?:of\s+)?(?:total|combined)",
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+(?:of\s+)?(?:proven|demonstrated)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("explicit experience pattern is valid"))
    .collect()
});

static EDUCATION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*education\b").expect("education header pattern is valid"));

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{1,2}/)?(\d{4})\s*(?:[-\u{2013}\u{2014}]|\bto\b)\s*(?:\d{1,2}/)?(\d{4}|present|current|now|ongoing)\b",
    )
    .expect("date range pattern is valid")
});

const MONTHS: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b\.?";

static MONTH_THEN_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b{MONTHS}\s+(\d{{4}})\b")).expect("month-year pattern is valid")
});

static YEAR_THEN_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{4}})\s+{MONTHS}\b")).expect("year-month pattern is valid")
});

/// Resolves years of experience against the current calendar year.
pub fn resolve_years(text: &str) -> u32 {
    resolve_years_at(text, Utc::now().year())
}

/// Resolves years of experience with an explicit "present" year.
pub fn resolve_years_at(text: &str, current_year: i32) -> u32 {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            strategy(text, current_year).inspect(|years| {
                tracing::debug!(strategy = *name, years = *years, "experience resolved");
            })
        })
        .unwrap_or(0)
}

/// Earliest explicit "N years ..." statement anywhere in the text.
pub fn explicit_statement(text: &str, _current_year: i32) -> Option<u32> {
    EXPLICIT_PATTERNS
        .iter()
        .filter_map(|re| re.captures(text))
        .filter_map(|caps| {
            let m = caps.get(1)?;
            Some((m.start(), m.as_str().parse::<u32>().ok()?))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, years)| years)
}

/// `max(end) - min(start)` across all mined spans, unless it breaks the ceiling.
pub fn span_aggregate(text: &str, current_year: i32) -> Option<u32> {
    let spans = mine_spans(text, current_year);
    let start = spans.iter().map(|s| s.start_year).min()?;
    let end = spans.iter().map(|s| s.end_year).max()?;
    let total = (end - start) as u32;
    (total <= SANITY_CEILING_YEARS).then_some(total)
}

/// Duration of the most recently started span (latest end breaks ties).
pub fn most_recent_span(text: &str, current_year: i32) -> Option<u32> {
    mine_spans(text, current_year)
        .into_iter()
        .max_by_key(|s| (s.start_year, s.end_year))
        .map(|s| s.years())
}

/// Everything before the first line that opens an Education section.
pub fn pre_education_section(text: &str) -> &str {
    match EDUCATION_HEADER.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Collects valid spans from the pre-education part of the document, in text order.
/// Ranges come first, then lone month-adjacent years (assumed ongoing) that are
/// not part of a range.
pub fn mine_spans(text: &str, current_year: i32) -> Vec<ExperienceSpan> {
    let scope = pre_education_section(text);
    let mut spans = Vec::new();
    let mut ranges = Vec::new();

    for caps in DATE_RANGE.captures_iter(scope) {
        if let Some(whole) = caps.get(0) {
            ranges.push(whole.range());
        }
        let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok()) else {
            continue;
        };
        let end = match caps.get(2).map(|m| m.as_str()) {
            Some(end) if end.chars().all(|c| c.is_ascii_digit()) => match end.parse::<i32>() {
                Ok(year) => year,
                Err(_) => continue,
            },
            Some(_) => current_year,
            None => continue,
        };
        spans.extend(ExperienceSpan::new(start, end, current_year));
    }

    for re in [&*MONTH_THEN_YEAR, &*YEAR_THEN_MONTH] {
        for caps in re.captures_iter(scope) {
            let Some(year) = caps.get(1) else {
                continue;
            };
            // Already counted as the start or end of a range.
            if ranges.iter().any(|r| r.contains(&year.start())) {
                continue;
            }
            if let Ok(start) = year.as_str().parse::<i32>() {
                spans.extend(ExperienceSpan::new(start, current_year, current_year));
            }
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2025;

    #[test]
    fn test_span_rejects_out_of_range_years() {
        assert!(ExperienceSpan::new(1949, 2000, YEAR).is_none());
        assert!(ExperienceSpan::new(2010, 2009, YEAR).is_none());
        assert!(ExperienceSpan::new(2020, 2026, YEAR).is_none());
        assert_eq!(ExperienceSpan::new(2020, 2025, YEAR).unwrap().years(), 5);
    }

    #[test]
    fn test_explicit_years_of_experience() {
        assert_eq!(explicit_statement("Over 7 years of experience in backend", YEAR), Some(7));
    }

    #[test]
    fn test_explicit_plus_years_in() {
        assert_eq!(explicit_statement("8+ years in software delivery", YEAR), Some(8));
    }

    #[test]
    fn test_explicit_experience_colon() {
        assert_eq!(explicit_statement("Experience: 12 years", YEAR), Some(12));
    }

    #[test]
    fn test_explicit_professional_and_total_variants() {
        assert_eq!(explicit_statement("3 years professional software work", YEAR), Some(3));
        assert_eq!(explicit_statement("9 years total across roles", YEAR), Some(9));
        assert_eq!(explicit_statement("4 years proven delivery", YEAR), Some(4));
    }

    #[test]
    fn test_explicit_first_statement_wins() {
        let text = "Summary: 5 years of experience building APIs.\nLater: 10 years experience overall.";
        assert_eq!(explicit_statement(text, YEAR), Some(5));
        assert_eq!(resolve_years_at(text, YEAR), 5);
    }

    #[test]
    fn test_explicit_wins_over_dates() {
        let text = "6 years of experience\nAcme 2001 - 2024";
        assert_eq!(resolve_years_at(text, YEAR), 6);
    }

    #[test]
    fn test_no_explicit_statement() {
        assert_eq!(explicit_statement("Engineer at Acme since 2019", YEAR), None);
    }

    #[test]
    fn test_education_dates_are_excluded() {
        let text = "2018 - 2023\nEDUCATION\nBachelor of Science 2014 - 2018";
        assert_eq!(resolve_years_at(text, YEAR), 5);
    }

    #[test]
    fn test_education_header_only_at_line_start() {
        let text = "Taught in the education sector 2010 - 2015\nLater role 2016 - 2020";
        assert_eq!(pre_education_section(text), text);
        assert_eq!(span_aggregate(text, YEAR), Some(10));
    }

    #[test]
    fn test_month_slash_year_ranges() {
        let text = "Acme Corp 03/2016 \u{2013} 08/2019\nGlobex 09/2019 - present";
        let spans = mine_spans(text, YEAR);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1], ExperienceSpan { start_year: 2019, end_year: YEAR });
        assert_eq!(resolve_years_at(text, YEAR), 9);
    }

    #[test]
    fn test_present_words_and_to_separator() {
        for word in ["present", "Current", "now", "ongoing"] {
            let text = format!("Initech 2020 to {word}");
            assert_eq!(resolve_years_at(&text, YEAR), 5, "failed for '{word}'");
        }
    }

    #[test]
    fn test_em_dash_separator() {
        assert_eq!(resolve_years_at("Hooli 2015\u{2014}2018", YEAR), 3);
    }

    #[test]
    fn test_lone_month_years_run_to_present() {
        let spans = mine_spans("Started Jan 2021 at Acme; joined 2023 March", YEAR);
        assert_eq!(
            spans,
            vec![
                ExperienceSpan { start_year: 2021, end_year: YEAR },
                ExperienceSpan { start_year: 2023, end_year: YEAR },
            ]
        );
    }

    #[test]
    fn test_month_prefixed_words_are_not_months() {
        let text = "Digital Marketing 2015 - 2018\nJunior 2019 Decade 2020 2021 Novel";
        assert_eq!(
            mine_spans(text, YEAR),
            vec![ExperienceSpan { start_year: 2015, end_year: 2018 }]
        );
        assert_eq!(resolve_years_at("Digital Marketing 2015 - 2018", YEAR), 3);
    }

    #[test]
    fn test_month_year_inside_range_counted_once() {
        let text = "Acme, Sep 2019 - 2022";
        assert_eq!(
            mine_spans(text, YEAR),
            vec![ExperienceSpan { start_year: 2019, end_year: 2022 }]
        );
        assert_eq!(resolve_years_at(text, YEAR), 3);
        assert_eq!(resolve_years_at("Globex, 2016 - 2019 March", YEAR), 3);
    }

    #[test]
    fn test_full_and_dotted_month_names() {
        let spans = mine_spans("Joined September 2022. Left Globex in Sept. 2021", YEAR);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start_year, 2022);
        assert_eq!(spans[1].start_year, 2021);
    }

    #[test]
    fn test_future_and_ancient_ranges_discarded() {
        let text = "Call 1234-5678\nArchive 1900 - 1910";
        assert!(mine_spans(text, YEAR).is_empty());
        assert_eq!(resolve_years_at(text, YEAR), 0);
    }

    #[test]
    fn test_sanity_ceiling_falls_back_to_most_recent_span() {
        let text = "Company founded 1960 - 2023\nAnalyst 2021 - 2023";
        assert_eq!(span_aggregate(text, YEAR), None);
        assert_eq!(most_recent_span(text, YEAR), Some(2));
        assert_eq!(resolve_years_at(text, YEAR), 2);
    }

    #[test]
    fn test_aggregate_at_ceiling_is_kept() {
        let text = "1975 - 2025";
        assert_eq!(span_aggregate(text, YEAR), Some(50));
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        assert_eq!(resolve_years_at("Motivated self-starter", YEAR), 0);
        assert_eq!(resolve_years_at("", YEAR), 0);
    }

    #[test]
    fn test_strategies_are_ordered() {
        let names: Vec<&str> = STRATEGIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["explicit_statement", "span_aggregate", "most_recent_span"]);
    }
}
