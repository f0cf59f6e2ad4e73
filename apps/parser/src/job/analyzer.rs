//! Job Posting Analyzer: keyword analysis with an optional semantic soft-skill pass.
//!
//! `analyze_keywords` is pure and deterministic. `JobPostingAnalyzer::analyze`
//! adds the embedding-based refinement when an encoder is configured and
//! falls back to the keyword result whenever that step fails or times out.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::complexity::rescore;
use super::semantic;
use super::taxonomy::{
    CERTIFICATION_KEYWORDS, DEGREE_ABBREVIATIONS, DEGREE_KEYWORDS, ENTRY_PHRASES,
    FIELDS_OF_STUDY, MID_PHRASES, RESPONSIBILITY_VERBS, SENIOR_PHRASES, SOFT_SKILLS,
    TECHNICAL_SKILLS,
};
use crate::config::Config;
use crate::models::job::{
    Complexity, EducationRequirements, ExperienceLevel, JobPostingProfile,
};
use crate::nlp_client::NlpCapabilities;
use crate::resume::normalize::{contains_token, dedup_exact, strip_bullet};

pub const KEYWORD_MODE: &str = "keyword";

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?;]+(?:\s+|$)|\n").expect("valid regex"));

// ────────────────────────────────────────────────────────────────────────────
// Keyword analysis
// ────────────────────────────────────────────────────────────────────────────

/// Pure keyword analysis of a job posting.
pub fn analyze_keywords(text: &str) -> JobPostingProfile {
    let normalized = normalize(text);

    let technical_skills: BTreeMap<String, Vec<String>> = TECHNICAL_SKILLS
        .iter()
        .filter_map(|(category, keywords)| {
            let found: Vec<String> = keywords
                .iter()
                .filter(|kw| mentions_skill(&normalized, kw))
                .map(|kw| kw.to_string())
                .collect();
            (!found.is_empty()).then(|| (category.to_string(), found))
        })
        .collect();

    let mut profile = JobPostingProfile {
        technical_skills,
        soft_skills: matching(&normalized, SOFT_SKILLS),
        experience_level: experience_level(&normalized),
        education_requirements: EducationRequirements {
            degrees: degrees(&normalized),
            fields: matching(&normalized, FIELDS_OF_STUDY),
            certifications: matching(&normalized, CERTIFICATION_KEYWORDS),
        },
        responsibilities: responsibilities(text),
        complexity: Complexity::Low,
        complexity_score: 0,
        analysis_mode: KEYWORD_MODE.to_string(),
        raw_text_length: text.chars().count(),
    };
    rescore(&mut profile);

    debug!(
        "Keyword analysis: {} technical skills, {} soft skills, level {:?}",
        profile.technical_skill_count(),
        profile.soft_skills.len(),
        profile.experience_level
    );
    profile
}

/// Boundary function for callers without an async runtime. Keyword analysis only.
pub fn parse_job_posting(text: &str) -> JobPostingProfile {
    analyze_keywords(text)
}

/// Lowercase, plain ASCII dashes and quotes, single spaces.
pub fn normalize(text: &str) -> String {
    let unified: String = text
        .chars()
        .map(|c| match c {
            '–' | '—' | '‐' | '‑' | '−' => '-',
            '‘' | '’' | '′' => '\'',
            '“' | '”' => '"',
            other => other,
        })
        .collect();
    unified
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn experience_level(normalized: &str) -> ExperienceLevel {
    let tiers = [
        (ExperienceLevel::Entry, ENTRY_PHRASES),
        (ExperienceLevel::Mid, MID_PHRASES),
        (ExperienceLevel::Senior, SENIOR_PHRASES),
    ];
    tiers
        .into_iter()
        .find(|(_, phrases)| phrases.iter().any(|p| contains_token(normalized, p)))
        .map(|(level, _)| level)
        .unwrap_or_default()
}

fn responsibilities(text: &str) -> BTreeMap<String, Vec<String>> {
    let sentences: Vec<&str> = SENTENCE_SPLIT
        .split(text)
        .map(strip_bullet)
        .filter(|s| !s.is_empty())
        .collect();

    RESPONSIBILITY_VERBS
        .iter()
        .filter_map(|(category, verbs)| {
            let hits: Vec<String> = sentences
                .iter()
                .filter(|s| {
                    let lower = normalize(s);
                    verbs.iter().any(|v| contains_verb(&lower, v))
                })
                .map(|s| s.to_string())
                .collect();
            let hits = dedup_exact(hits);
            (!hits.is_empty()).then(|| (category.to_string(), hits))
        })
        .collect()
}

fn degrees(normalized: &str) -> Vec<String> {
    let mut found = matching(normalized, DEGREE_KEYWORDS);
    found.extend(
        DEGREE_ABBREVIATIONS
            .iter()
            .filter(|(_, phrases)| phrases.iter().any(|p| contains_token(normalized, p)))
            .map(|(label, _)| label.to_string()),
    );
    found
}

fn matching(normalized: &str, phrases: &[&str]) -> Vec<String> {
    phrases
        .iter()
        .filter(|p| contains_token(normalized, p))
        .map(|p| p.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Token matching
// ────────────────────────────────────────────────────────────────────────────

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn left_bounded(text: &str, start: usize) -> bool {
    text[..start].chars().next_back().map_or(true, |c| !is_word_char(c))
}

fn right_bounded(rest: &str) -> bool {
    rest.chars().next().map_or(true, |c| !is_word_char(c))
}

/// Like `contains_token`, but also accepts a `js`/`.js` suffix ("node.js", "vuejs").
/// A following "programming", "development" or "framework" is just another token.
fn mentions_skill(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(start, _)| {
        if !left_bounded(text, start) {
            return false;
        }
        let rest = &text[start + keyword.len()..];
        right_bounded(rest)
            || [".js", "js"]
                .iter()
                .filter_map(|suffix| rest.strip_prefix(suffix))
                .any(right_bounded)
    })
}

/// `verb` or one of its inflections ("design", "designs", "designed",
/// "designing", "managing"). Nouns like "developer" do not count.
fn contains_verb(text: &str, verb: &str) -> bool {
    const SUFFIXES: [&str; 6] = ["", "s", "es", "d", "ed", "ing"];
    let inflected = SUFFIXES
        .iter()
        .any(|suffix| contains_token(text, &format!("{verb}{suffix}")));
    inflected
        || verb
            .strip_suffix('e')
            .is_some_and(|stem| contains_token(text, &format!("{stem}ing")))
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer with optional semantic refinement
// ────────────────────────────────────────────────────────────────────────────

/// Analyzer carrying the optional encoder. Shared read-only across tasks.
#[derive(Debug, Clone, Default)]
pub struct JobPostingAnalyzer {
    config: Config,
    nlp: NlpCapabilities,
}

impl JobPostingAnalyzer {
    pub fn new(config: Config, nlp: NlpCapabilities) -> Self {
        Self { config, nlp }
    }

    pub async fn analyze(&self, text: &str) -> JobPostingProfile {
        let mut profile = analyze_keywords(text);

        if let Some(encoder) = self.nlp.encoder() {
            semantic::refine(
                &mut profile,
                text,
                encoder.as_ref(),
                self.config.semantic_threshold,
                self.config.semantic_timeout,
            )
            .await;
        }

        info!(
            "Job posting analyzed ({} mode): complexity {:?} ({})",
            profile.analysis_mode, profile.complexity, profile.complexity_score
        );
        profile
    }
}
