//! Section Segmenter: locate a named section and its span in résumé text.

use serde::{Deserialize, Serialize};

use super::normalize::is_bullet;
use super::vocabulary::MAJOR_SECTIONS;

const MAX_HEADING_CHARS: usize = 50;
const MAX_EXTRA_HEADING_WORDS: usize = 2;
const DECORATION: &[char] = &['-', '=', '*', '_', '#', ':', '|', '~'];

/// A contiguous run of lines belonging to one résumé section.
/// `start_line..end_line` is half-open; `content` includes the heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
}

impl Section {
    /// Section text without its heading line.
    pub fn body(&self) -> &str {
        match self.content.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        }
    }
}

/// Finds the first section matching any candidate, trying candidates in order.
pub fn find_section(text: &str, candidates: &[&str]) -> Option<Section> {
    let lines: Vec<&str> = text.lines().collect();

    for candidate in candidates {
        let name = candidate.to_lowercase();
        let Some(start) = lines.iter().position(|l| is_heading(l, &name)) else {
            continue;
        };

        let end = lines[start + 1..]
            .iter()
            .position(|l| {
                MAJOR_SECTIONS
                    .iter()
                    .filter(|major| **major != name)
                    .any(|major| is_heading(l, major))
            })
            .map(|offset| start + 1 + offset)
            .unwrap_or(lines.len());

        tracing::debug!("Section '{name}' spans lines {start}..{end}");
        return Some(Section {
            name,
            start_line: start,
            end_line: end,
            content: lines[start..end].join("\n"),
        });
    }

    None
}

/// Whether `line` is a heading for the lowercase section `name`.
pub fn is_heading(line: &str, name: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_HEADING_CHARS {
        return false;
    }

    let core = trimmed.trim_matches(|c: char| DECORATION.contains(&c) || c.is_whitespace());
    let lower = core.to_lowercase();
    if lower == name {
        return true;
    }

    is_loose_heading(trimmed, core, name)
}

/// "Work Experience", "TECHNICAL SKILLS", "Skills & Tools".
fn is_loose_heading(trimmed: &str, core: &str, name: &str) -> bool {
    if is_bullet(trimmed) || trimmed.ends_with('.') {
        return false;
    }
    if !core
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || "&/'".contains(c))
    {
        return false;
    }

    let words: Vec<&str> = core.split_whitespace().collect();
    let capitalised = words.iter().all(|w| {
        w.chars()
            .next()
            .map_or(true, |c| !c.is_alphabetic() || c.is_uppercase())
    });
    if !capitalised {
        return false;
    }

    let lower_words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let name_words: Vec<&str> = name.split_whitespace().collect();
    let n = name_words.len();
    if lower_words.len() <= n || lower_words.len() - n > MAX_EXTRA_HEADING_WORDS {
        return false;
    }

    let ends_with_name = lower_words[lower_words.len() - n..]
        .iter()
        .zip(&name_words)
        .all(|(a, b)| a == b);
    if ends_with_name {
        return true;
    }

    // "Skills & Interests", "Awards and Honors"
    let starts_with_name = lower_words[..n].iter().zip(&name_words).all(|(a, b)| a == b);
    starts_with_name && matches!(lower_words[n].as_str(), "&" | "and" | "/")
}
