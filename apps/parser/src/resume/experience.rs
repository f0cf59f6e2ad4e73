use std::sync::LazyLock;

use regex::Regex;

use super::blocks::{parse_blocks, BlockParser, BlockSegmenter, Leading};
use super::normalize::{content_lines, dedup_exact, is_bullet, strip_bullet};
use super::sections::{find_section, is_heading};
use super::vocabulary::{mentions_action_verb, starts_with_action_verb, MAJOR_SECTIONS, ROLE_KEYWORDS};
use crate::errors::ParseError;
use crate::models::resume::ExperienceEntry;

pub const EXPERIENCE_SECTIONS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "work history",
    "employment",
    "employment history",
    "career history",
];

/// Lines after a title line that may still carry its date range or company.
const LOOKAHEAD_LINES: usize = 3;
const MIN_DESCRIPTION_CHARS: usize = 10;
const LONG_LINE_CHARS: usize = 30;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

static ROLE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = ROLE_KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})s?\b")).expect("valid regex")
});
static DATE_RANGE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:\b{MONTH}\s+\d{{4}}\b|\b\d{{1,2}}/\d{{4}}\b).*?(?:present|current|\d{{4}})"
    ))
    .expect("valid regex")
});
static DURATIONS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    let sep = r"\s*(?:[–—-]|to)\s*";
    [
        format!(r"(?i)\b({MONTH}\s+\d{{4}}){sep}({MONTH}\s+\d{{4}}|present|current)\b"),
        format!(r"(?i)\b(\d{{1,2}}/\d{{4}}){sep}(\d{{1,2}}/\d{{4}}|present|current)\b"),
        format!(r"(?i)\b(\d{{4}}){sep}(\d{{4}}|present|current)\b"),
    ]
    .map(|p| Regex::new(&p).expect("valid regex"))
});
static DATE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    let point = format!(r"(?:{MONTH}\s+\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}})");
    Regex::new(&format!(
        r"(?i)^\(?{point}\s*(?:[–—-]|to)\s*(?:{point}|present|current)\)?$"
    ))
    .expect("valid regex")
});
static DATE_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:19|20)\d{2}\b|\b\d{1,2}/\d{4}\b|\bpresent\b|\bcurrent\b").expect("valid regex")
});
static TRAILING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\s+[(\[]?(?:{MONTH}\s+\d{{4}}|\d{{1,2}}/\d{{4}}|(?:19|20)\d{{2}}\b).*$"
    ))
    .expect("valid regex")
});
static INLINE_COMPANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:at|@|\|)\s+").expect("valid regex"));
static REMOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bRemote\b").expect("valid regex"));
static HYBRID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bHybrid\b").expect("valid regex"));
static CITY_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)*, [A-Z]{2}\b").expect("valid regex")
});
static CITY_COUNTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?: [A-Z][a-z]+)*, [A-Z][a-z]+(?: [A-Z][a-z]+)*$").expect("valid regex")
});

/// Work history from the experience section, or the whole document when absent.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let scope = find_section(text, EXPERIENCE_SECTIONS)
        .map(|s| s.body().to_string())
        .unwrap_or_else(|| text.to_string());
    let lines = content_lines(&scope);

    let segmenter = BlockSegmenter::new(is_job_start, Leading::Drop);
    let blocks: Vec<Vec<&str>> = split_at_headings(&lines)
        .into_iter()
        .flat_map(|segment| segmenter.split(&segment))
        .collect();

    parse_blocks(&ExperienceParser, &blocks)
}

/// Section headings never belong to a job, so they cut the line list into segments.
fn split_at_headings<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut segments = vec![Vec::new()];
    for &line in lines {
        let heading = MAJOR_SECTIONS
            .iter()
            .chain(EXPERIENCE_SECTIONS)
            .any(|name| is_heading(line, name));
        if heading {
            segments.push(Vec::new());
        } else if let Some(current) = segments.last_mut() {
            current.push(line);
        }
    }
    segments.retain(|s| !s.is_empty());
    segments
}

/// A role line with a date range on it or shortly after, unless an earlier
/// role line is still waiting for its own date range.
fn is_job_start(lines: &[&str], i: usize) -> bool {
    is_role_line(lines[i])
        && date_range_index(lines, i).is_some()
        && !awaits_date_range(lines, i)
}

fn is_role_line(line: &str) -> bool {
    !is_bullet(line) && !starts_with_action_verb(line) && ROLE.is_match(line)
}

/// Index of the first date range within the look-ahead of line `i`.
fn date_range_index(lines: &[&str], i: usize) -> Option<usize> {
    (i..lines.len())
        .take(LOOKAHEAD_LINES + 1)
        .find(|&j| DATE_RANGE_HINT.is_match(lines[j]))
}

/// Line `i` sits between a title and that title's date range, where the
/// company line goes.
fn awaits_date_range(lines: &[&str], i: usize) -> bool {
    (i.saturating_sub(LOOKAHEAD_LINES)..i).any(|j| {
        is_role_line(lines[j]) && date_range_index(lines, j).is_some_and(|d| d >= i)
    })
}

pub struct ExperienceParser;

impl BlockParser for ExperienceParser {
    type Entry = ExperienceEntry;

    fn name(&self) -> &'static str {
        "experience"
    }

    fn parse(&self, block: &[&str]) -> Result<ExperienceEntry, ParseError> {
        let title_idx = block
            .iter()
            .position(|l| !is_bullet(l) && ROLE.is_match(l))
            .or_else(|| block.first().filter(|l| !is_bullet(l)).map(|_| 0))
            .ok_or_else(|| ParseError::extractor(self.name(), "block has no title line"))?;

        let (title, inline_company) = split_title(block[title_idx]);
        if title.is_empty() {
            return Err(ParseError::extractor(self.name(), "title is empty after cleanup"));
        }

        let (company, company_idx) = match inline_company {
            Some(company) => (Some(company), None),
            None => match find_company(block, title_idx) {
                Some(idx) => (Some(block[idx].to_string()), Some(idx)),
                None => (None, None),
            },
        };

        let description = block
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != title_idx && Some(*j) != company_idx)
            .filter_map(|(_, line)| description_item(line, &title, company.as_deref()))
            .collect();

        Ok(ExperienceEntry {
            duration: find_duration(&block.join("\n")),
            location: find_location(block),
            title,
            company,
            description: dedup_exact(description),
        })
    }
}

/// Strips trailing dates and peels off "at Company" / "| Company".
fn split_title(line: &str) -> (String, Option<String>) {
    let line = strip_bullet(line);
    let cleaned = TRAILING_DATE.replace(line, "");
    let cleaned = cleaned.trim_end_matches(|c: char| c.is_whitespace() || ",|–—-(".contains(c));

    match INLINE_COMPANY.splitn(cleaned, 2).collect::<Vec<_>>().as_slice() {
        [title, company] if !company.trim().is_empty() && !is_location(company.trim()) => {
            (title.trim().to_string(), Some(company.trim().to_string()))
        }
        [title, ..] => (title.trim().to_string(), None),
        [] => (String::new(), None),
    }
}

fn find_company(block: &[&str], title_idx: usize) -> Option<usize> {
    (title_idx + 1..block.len())
        .take(LOOKAHEAD_LINES)
        .find(|&i| {
            let line = block[i];
            let len = line.chars().count();
            !is_bullet(line)
                && !DATE_MENTION.is_match(line)
                && !starts_with_action_verb(line)
                && !is_location(line)
                && len > 3
                && len < 100
        })
}

fn find_duration(block_text: &str) -> Option<String> {
    DURATIONS.iter().find_map(|re| {
        re.captures(block_text)
            .map(|c| format!("{} – {}", c[1].trim(), c[2].trim()))
    })
}

/// Remote or Hybrid anywhere in the block; places only on header lines.
fn find_location(block: &[&str]) -> Option<String> {
    let text = block.join("\n");
    if let Some(m) = REMOTE.find(&text).or_else(|| HYBRID.find(&text)) {
        return Some(m.as_str().to_string());
    }
    let headers: Vec<&str> = block
        .iter()
        .copied()
        .filter(|l| !is_bullet(l) && !starts_with_action_verb(l))
        .collect();
    if let Some(m) = headers.iter().find_map(|l| CITY_STATE.find(l)) {
        return Some(m.as_str().to_string());
    }
    headers
        .iter()
        .flat_map(|l| l.split(['|', '·']))
        .map(str::trim)
        .find(|seg| CITY_COUNTRY.is_match(seg))
        .map(str::to_string)
}

fn is_location(text: &str) -> bool {
    let text = text.trim();
    text == "Remote" || text == "Hybrid" || CITY_COUNTRY.is_match(text) || {
        CITY_STATE.find(text).is_some_and(|m| m.as_str() == text)
    }
}

fn description_item(line: &str, title: &str, company: Option<&str>) -> Option<String> {
    if line.chars().count() < MIN_DESCRIPTION_CHARS || DATE_ONLY.is_match(line) {
        return None;
    }
    let clean = strip_bullet(line);
    if clean.is_empty() || clean == title || Some(clean) == company || is_location(clean) {
        return None;
    }
    let keep = is_bullet(line)
        || mentions_action_verb(clean)
        || clean.chars().count() > LONG_LINE_CHARS;
    keep.then(|| clean.to_string())
}
