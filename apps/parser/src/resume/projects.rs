use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

use super::blocks::{parse_blocks, BlockParser, BlockSegmenter, Leading, StartPredicate};
use super::normalize::{content_lines, dedup_by, is_bullet, normalize_key, strip_bullet};
use super::sections::find_section;
use super::vocabulary::starts_with_action_verb;
use crate::errors::ParseError;
use crate::extraction::cascade::Cascade;
use crate::models::resume::{ProjectEntry, NO_PROJECT_DESCRIPTION};

pub const PROJECT_SECTIONS: &[&str] = &[
    "projects",
    "personal projects",
    "side projects",
    "key projects",
    "notable projects",
    "academic projects",
];

const MAX_PROJECTS: usize = 10;
const MAX_TITLE_CHARS: usize = 60;

/// Leading words of lines that describe a project rather than name one.
const DESCRIPTION_CUES: &[&str] = &[
    "tech",
    "technologies",
    "tools",
    "stack",
    "built",
    "developed",
    "used",
    "implemented",
    "created",
    "designed",
];

static ALL_CAPS_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][^a-z]{5,}$").expect("valid regex"));
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*[A-Z]").expect("valid regex"));
static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid regex"));
static COLON_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Za-z0-9 '&+-]{2,60}):(.*)$").expect("valid regex"));

pub fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    let Some(section) = find_section(text, PROJECT_SECTIONS) else {
        return vec![];
    };
    let lines = content_lines(section.body());
    if lines.is_empty() {
        return vec![];
    }

    let cascade = Cascade::<[&str], Vec<Vec<&str>>>::new("projects")
        .then("separators", split_on_separators)
        .then("title-lines", split_on_title_lines)
        .then("capitalized-lines", split_on_capitalized_lines);

    let blocks = match cascade.run(&lines) {
        Ok((_, blocks)) => blocks,
        Err(e) => {
            tracing::debug!("No project blocks found: {e}");
            return vec![];
        }
    };

    let projects = dedup_by(parse_blocks(&ProjectParser, &blocks), |p| normalize_key(&p.name));
    projects.into_iter().take(MAX_PROJECTS).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Splitting strategies
// ────────────────────────────────────────────────────────────────────────────

/// First explicit separator style that yields more than one block.
fn split_on_separators<'a>(lines: &[&'a str]) -> Result<Vec<Vec<&'a str>>> {
    const SEPARATORS: [StartPredicate; 4] = [
        is_all_caps_title,
        is_numbered_title,
        is_colon_title,
        is_bulleted_title,
    ];
    for predicate in SEPARATORS {
        let blocks = BlockSegmenter::new(predicate, Leading::Keep).split(lines);
        if blocks.len() > 1 {
            return Ok(blocks);
        }
    }
    bail!("no separator style splits the section")
}

/// Title-looking lines that are followed by description lines.
fn split_on_title_lines<'a>(lines: &[&'a str]) -> Result<Vec<Vec<&'a str>>> {
    fn starts(lines: &[&str], i: usize) -> bool {
        is_title_like(lines[i]) && lines.get(i + 1).is_some_and(|next| !is_title_like(next))
    }
    non_empty(BlockSegmenter::new(starts, Leading::Drop).split(lines))
}

fn split_on_capitalized_lines<'a>(lines: &[&'a str]) -> Result<Vec<Vec<&'a str>>> {
    fn starts(lines: &[&str], i: usize) -> bool {
        let line = lines[i];
        line.chars().count() < MAX_TITLE_CHARS
            && !line.ends_with('.')
            && line.chars().next().is_some_and(char::is_uppercase)
    }
    non_empty(BlockSegmenter::new(starts, Leading::Drop).split(lines))
}

fn non_empty<'a>(blocks: Vec<Vec<&'a str>>) -> Result<Vec<Vec<&'a str>>> {
    if blocks.is_empty() {
        bail!("no title lines found");
    }
    Ok(blocks)
}

fn is_all_caps_title(lines: &[&str], i: usize) -> bool {
    ALL_CAPS_TITLE.is_match(lines[i])
}

fn is_numbered_title(lines: &[&str], i: usize) -> bool {
    NUMBERED.is_match(lines[i])
}

fn is_colon_title(lines: &[&str], i: usize) -> bool {
    COLON_TITLE
        .captures(lines[i])
        .is_some_and(|c| !has_description_cue(&c[1]))
}

fn is_bulleted_title(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    let rest = strip_bullet(line);
    bullets_alternate(lines)
        && line.trim_start().starts_with('•')
        && rest.chars().count() < MAX_TITLE_CHARS
        && rest.chars().next().is_some_and(char::is_uppercase)
        && !rest.ends_with('.')
        && !starts_with_action_verb(rest)
}

/// Bullets mark titles only when the section opens with one and every
/// bullet is followed by plain description lines.
fn bullets_alternate(lines: &[&str]) -> bool {
    lines.first().is_some_and(|l| is_bullet(l))
        && !lines.windows(2).any(|w| is_bullet(w[0]) && is_bullet(w[1]))
}

/// Short capitalized line that is not a sentence, bullet or tooling note.
fn is_title_like(line: &str) -> bool {
    line.chars().count() < MAX_TITLE_CHARS
        && !is_bullet(line)
        && !line.ends_with('.')
        && line.chars().next().is_some_and(char::is_uppercase)
        && !has_description_cue(line)
}

fn has_description_cue(line: &str) -> bool {
    let first = line
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or_default()
        .to_lowercase();
    DESCRIPTION_CUES.contains(&first.as_str())
}

// ────────────────────────────────────────────────────────────────────────────
// Block parsing
// ────────────────────────────────────────────────────────────────────────────

pub struct ProjectParser;

impl BlockParser for ProjectParser {
    type Entry = ProjectEntry;

    fn name(&self) -> &'static str {
        "projects"
    }

    fn parse(&self, block: &[&str]) -> Result<ProjectEntry, ParseError> {
        let (first, rest) = block
            .split_first()
            .ok_or_else(|| ParseError::extractor(self.name(), "empty block"))?;

        let heading = NUMBER_PREFIX.replace(strip_bullet(first), "").into_owned();
        let (name, inline_description) = match COLON_TITLE.captures(&heading) {
            Some(c) if !c[2].trim().is_empty() => (c[1].trim().to_string(), Some(c[2].trim().to_string())),
            _ => (heading.trim_end_matches(':').trim().to_string(), None),
        };

        let len = name.chars().count();
        if !(3..=100).contains(&len) {
            return Err(ParseError::extractor(self.name(), format!("bad name length {len}")));
        }
        if PROJECT_SECTIONS.contains(&name.to_lowercase().as_str()) {
            return Err(ParseError::extractor(self.name(), "name is a section heading"));
        }

        let description: Vec<String> = inline_description
            .into_iter()
            .chain(rest.iter().map(|l| l.to_string()))
            .collect();
        let description = if description.is_empty() {
            NO_PROJECT_DESCRIPTION.to_string()
        } else {
            description.join("\n")
        };

        Ok(ProjectEntry { name, description })
    }
}
