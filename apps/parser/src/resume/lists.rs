//! Certifications and awards: one item per line of their section.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{content_lines, dedup_exact, strip_bullet};
use super::sections::find_section;

pub const CERTIFICATION_SECTIONS: &[&str] =
    &["certifications", "certificates", "licenses", "credentials"];
pub const AWARD_SECTIONS: &[&str] = &[
    "awards",
    "honors",
    "achievements",
    "recognition",
    "accomplishments",
];

const MAX_CERTIFICATIONS: usize = 10;
const MAX_AWARDS: usize = 8;
const MIN_ITEM_CHARS: usize = 5;

const CERTIFICATION_WORDS: &[&str] = &["certified", "certificate", "license", "credential"];
const AWARD_HEADER_PREFIXES: &[&str] = &["award", "honor", "achievement", "recognition"];

static ACRONYM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2,}").expect("valid regex"));

pub fn extract_certifications(text: &str) -> Vec<String> {
    let Some(section) = find_section(text, CERTIFICATION_SECTIONS) else {
        return vec![];
    };

    let items = section_items(section.body())
        .filter(|item| {
            let lower = item.to_lowercase();
            CERTIFICATION_WORDS.iter().any(|w| lower.contains(w)) || ACRONYM.is_match(item)
        })
        .collect();

    let mut certs = dedup_exact(items);
    certs.truncate(MAX_CERTIFICATIONS);
    certs
}

pub fn extract_awards(text: &str) -> Vec<String> {
    let Some(section) = find_section(text, AWARD_SECTIONS) else {
        return vec![];
    };

    let items = section_items(section.body())
        .filter(|item| {
            let lower = item.to_lowercase();
            !AWARD_HEADER_PREFIXES.iter().any(|p| lower.starts_with(p))
        })
        .collect();

    let mut awards = dedup_exact(items);
    awards.truncate(MAX_AWARDS);
    awards
}

fn section_items(body: &str) -> impl Iterator<Item = String> + '_ {
    content_lines(body)
        .into_iter()
        .map(strip_bullet)
        .filter(|item| item.chars().count() > MIN_ITEM_CHARS)
        .map(str::to_string)
}
