use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{contains_token, dedup_normalized, normalize_key, strip_bullet};
use super::sections::find_section;
use super::vocabulary::SKILL_VOCABULARY;

pub const SKILL_SECTIONS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "technologies",
    "technical competencies",
    "proficiencies",
    "expertise",
];

/// Below this many parsed skills the whole document is scanned for known skill names.
const THIN_SKILL_LIST: usize = 5;

const NOISE_WORDS: &[&str] = &[
    "skill",
    "skills",
    "technical",
    "core",
    "competencies",
    "technologies",
    "and",
    "or",
    "with",
    "including",
    "experience",
];

const ITEM_SEPARATORS: &[char] = &[',', ';', '|', '•', '·', '▪', '◦', '‣', '⁃', '\n'];

static CATEGORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z /&+]{0,40}):\s*(.*)$").expect("valid regex")
});

/// Skills from the skills section, topped up from the vocabulary when thin.
pub fn extract_skills(text: &str, max_skills: usize) -> Vec<String> {
    let mut skills = match find_section(text, SKILL_SECTIONS) {
        Some(section) => {
            let categorized = parse_categories(section.body());
            if categorized.is_empty() {
                split_items(section.body())
            } else {
                categorized.into_iter().flat_map(|(_, items)| items).collect()
            }
        }
        None => Vec::new(),
    };

    if dedup_normalized(skills.clone()).len() < THIN_SKILL_LIST {
        skills.extend(scan_vocabulary(text));
    }

    let mut skills = dedup_normalized(skills);
    skills.truncate(max_skills);
    skills
}

/// `Category: a, b` lines; following lines without a category continue the current one.
pub fn parse_categories(body: &str) -> Vec<(String, Vec<String>)> {
    let mut categories: Vec<(String, String)> = Vec::new();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let line = strip_bullet(line);
        if let Some(caps) = CATEGORY_LINE.captures(line) {
            categories.push((caps[1].trim().to_string(), caps[2].to_string()));
        } else if let Some((_, values)) = categories.last_mut() {
            values.push('\n');
            values.push_str(line);
        }
    }

    categories
        .into_iter()
        .map(|(name, values)| (name, split_items(&values)))
        .collect()
}

fn split_items(values: &str) -> Vec<String> {
    values
        .split(ITEM_SEPARATORS)
        .map(|item| strip_bullet(item).trim_end_matches('.').trim())
        .filter(|item| {
            let len = item.chars().count();
            (2..=50).contains(&len) && !NOISE_WORDS.contains(&item.to_lowercase().as_str())
        })
        .map(str::to_string)
        .collect()
}

/// Vocabulary entries present in `text` as whole tokens, or with spaces, dots
/// and hyphens ignored ("nodejs" finds "Node.js", "PowerBI" finds "Power BI").
pub fn scan_vocabulary(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || ",;|()[]{}:/\"'".contains(c))
        .filter(|t| !t.is_empty())
        .collect();

    let mut compact: HashSet<String> = tokens.iter().map(|t| compact_token(t)).collect();
    compact.extend(
        tokens
            .windows(2)
            .map(|pair| format!("{}{}", compact_token(pair[0]), compact_token(pair[1]))),
    );

    SKILL_VOCABULARY
        .iter()
        .filter(|skill| {
            let needle = skill.to_lowercase();
            contains_token(&lower, &needle) || compact.contains(&compact_token(&needle))
        })
        .map(|skill| skill.to_string())
        .collect()
}

fn compact_token(token: &str) -> String {
    token
        .trim_end_matches(|c: char| c == '.' || c == '-')
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect()
}
