use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{dedup_by, is_bullet};
use super::sections::find_section;
use super::vocabulary::INSTITUTION_KEYWORDS;
use crate::models::resume::{EducationEntry, INSTITUTION_NOT_SPECIFIED};
use crate::nlp_client::{EntityLabel, NlpCapabilities};

pub const EDUCATION_SECTIONS: &[&str] = &[
    "education",
    "academic background",
    "qualifications",
    "academic",
    "schooling",
];

const LOOKAHEAD_LINES: usize = 3;

/// Degree patterns, most specific first. Only the first hit on a line counts.
static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:bachelor|master|doctor|associate)(?:'s|’s|s)?\s+(?:of|in|degree)\b",
        r"(?i)\bdoctorate\b",
        r"\b(?:B\.S\.|B\.A\.|M\.S\.|M\.A\.|Ph\.D\.?|M\.B\.A\.|B\.Sc\.|M\.Sc\.)",
        r"\b(?:BS|BA|MS|MA|MBA|BSc|MSc|BEng|MEng|MD|JD|LLM|BFA|MFA|PhD)\b",
        r"(?i:\bhigh school diploma\b)|\bGED\b|(?i:\bdiploma\b)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});
pub(crate) static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));
static GPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:c?gpa|grade point average)\s*:?\s*(\d+(?:\.\d+)?(?:\s*/\s*\d+(?:\.\d+)?)?)")
        .expect("valid regex")
});
/// Degree abbreviations that double as US state codes.
const STATE_CODES: &[&str] = &["MA", "MD", "MS"];
static CITY_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][a-z]+(?: [A-Z][a-z]+)*),\s*$").expect("valid regex"));
static PLACE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d{5}(?:-\d{4})?)?\s*(?:$|[,|(])").expect("valid regex"));
static PLACE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*[A-Z][a-z]+(?: [A-Z][a-z]+)*,\s*[A-Z]{2}(?:\s+\d{5})?$").expect("valid regex")
});
static SEGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,|\||\s[-–—]\s)\s*").expect("valid regex"));

/// Education entries from the education section, or the whole document when absent.
pub fn extract_education(text: &str, nlp: &NlpCapabilities) -> Vec<EducationEntry> {
    let scope = find_section(text, EDUCATION_SECTIONS)
        .map(|s| s.body().to_string())
        .unwrap_or_else(|| text.to_string());
    let lines: Vec<&str> = scope.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let mut entries = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let Some(start) = degree_match_start(line) else {
            continue;
        };

        let window: Vec<&str> = lines[i + 1..]
            .iter()
            .take(LOOKAHEAD_LINES)
            .take_while(|l| degree_match_start(l).is_none())
            .copied()
            .collect();

        let (degree, inline_institution) = split_degree_line(line, start);
        if degree.chars().count() < 2 {
            continue;
        }

        let institution = inline_institution
            .or_else(|| find_institution(&window))
            .or_else(|| organization_entity(&window, nlp))
            .unwrap_or_else(|| INSTITUTION_NOT_SPECIFIED.to_string());

        let year = std::iter::once(*line)
            .chain(window.iter().copied())
            .find_map(|l| YEAR.find(l).map(|m| m.as_str().to_string()));
        let gpa = std::iter::once(*line)
            .chain(window.iter().copied())
            .find_map(|l| GPA.captures(l).map(|c| compact_gpa(&c[1])));

        entries.push(EducationEntry {
            degree,
            institution,
            year,
            gpa,
        });
    }

    dedup_by(entries, |e| {
        (e.degree.to_lowercase(), e.institution.to_lowercase())
    })
}

fn degree_match_start(line: &str) -> Option<usize> {
    DEGREE_PATTERNS.iter().find_map(|re| {
        re.find_iter(line)
            .find(|m| !is_state_code(line, m))
            .map(|m| m.start())
    })
}

/// "Boston, MA": a state-like abbreviation closing a city segment.
fn is_state_code(line: &str, m: &regex::Match) -> bool {
    STATE_CODES.contains(&m.as_str())
        && CITY_BEFORE
            .captures(&line[..m.start()])
            .is_some_and(|c| !has_institution_keyword(&c[1]))
        && PLACE_TAIL.is_match(&line[m.end()..])
}

/// Degree text runs from the match to the first separator, year or GPA.
/// Any segment on the same line that names an institution is returned too.
fn split_degree_line(line: &str, start: usize) -> (String, Option<String>) {
    let prefix = &line[..start];
    let rest = &line[start..];

    let mut segments = SEGMENT_SPLIT.split(rest);
    let mut degree = segments.next().unwrap_or_default();
    if let Some(m) = YEAR.find(degree) {
        degree = &degree[..m.start()];
    }
    if let Some(m) = GPA.find(degree) {
        degree = &degree[..m.start()];
    }
    let degree = degree
        .trim_end_matches(|c: char| c.is_whitespace() || "(-–—|,[".contains(c))
        .to_string();

    let institution = SEGMENT_SPLIT
        .split(prefix)
        .chain(segments)
        .map(str::trim)
        .find(|seg| has_institution_keyword(seg))
        .map(|seg| seg.to_string());

    (degree, institution)
}

fn has_institution_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    INSTITUTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn find_institution(window: &[&str]) -> Option<String> {
    window
        .iter()
        .find(|l| has_institution_keyword(l))
        .or_else(|| window.iter().find(|l| is_plausible_institution(l)))
        .map(|l| clean_institution(l))
}

/// Free-text line that could name a school: not a bullet, date, GPA or label line.
fn is_plausible_institution(line: &str) -> bool {
    let len = line.chars().count();
    (3..=100).contains(&len)
        && !is_bullet(line)
        && !line.contains(':')
        && !GPA.is_match(line)
        && line.chars().next().is_some_and(char::is_uppercase)
        && YEAR.replace_all(line, "").chars().any(char::is_alphabetic)
        && !YEAR.is_match(line.split_whitespace().next().unwrap_or_default())
}

/// Drops a trailing date run and a ", City, ST" tail from an institution line.
fn clean_institution(line: &str) -> String {
    let cut = YEAR.find(line).map_or(line.len(), |m| m.start());
    let line = line[..cut].trim_end_matches(|c: char| c.is_whitespace() || "(-–—|,".contains(c));
    PLACE_SUFFIX.replace(line, "").trim_end().to_string()
}

fn organization_entity(window: &[&str], nlp: &NlpCapabilities) -> Option<String> {
    if window.is_empty() {
        return None;
    }
    nlp.recognize_entities(&window.join("\n"))?
        .into_iter()
        .find(|e| e.label == EntityLabel::Organization)
        .map(|e| e.text)
}

fn compact_gpa(raw: &str) -> String {
    raw.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp_client::testing::{entity, FixedRecognizer};
    use std::sync::Arc;

    fn none() -> NlpCapabilities {
        NlpCapabilities::none()
    }

    #[test]
    fn test_degree_with_lookahead_institution_year_and_gpa() {
        let text = "EDUCATION\nBachelor of Science in Computer Science\nStanford University\n2016 - 2020\nGPA: 3.8 / 4.0";
        let entries = extract_education(text, &none());
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.degree, "Bachelor of Science in Computer Science");
        assert_eq!(e.institution, "Stanford University");
        assert_eq!(e.year.as_deref(), Some("2016"));
        assert_eq!(e.gpa.as_deref(), Some("3.8/4.0"));
    }

    #[test]
    fn test_inline_institution_and_year() {
        let text = "Education\nB.S. Mechanical Engineering, Georgia Institute of Technology, 2019";
        let entries = extract_education(text, &none());
        assert_eq!(entries[0].degree, "B.S. Mechanical Engineering");
        assert_eq!(entries[0].institution, "Georgia Institute of Technology");
        assert_eq!(entries[0].year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_institution_before_degree_on_same_line() {
        let text = "Education\nHarvard University | MBA 2015";
        let entries = extract_education(text, &none());
        assert_eq!(entries[0].degree, "MBA");
        assert_eq!(entries[0].institution, "Harvard University");
    }

    #[test]
    fn test_missing_institution_uses_sentinel() {
        let entries = extract_education("Education\nPhD\n", &none());
        assert_eq!(entries[0].degree, "PhD");
        assert_eq!(entries[0].institution, "Institution not specified");
    }

    #[test]
    fn test_duplicate_degree_and_institution_collapse() {
        let text = "Education\nMS Data Science\nNorthwestern University\n\nMS Data Science\nnorthwestern university";
        let entries = extract_education(text, &none());
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_lookahead_stops_at_next_degree() {
        let text = "Education\nMBA\nBS Economics\nUniversity of Chicago";
        let entries = extract_education(text, &none());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].institution, "Institution not specified");
        assert_eq!(entries[1].institution, "University of Chicago");
    }

    #[test]
    fn test_whole_document_used_without_section() {
        let text = "Jane Roe\nMaster of Arts in History\nBoston College";
        let entries = extract_education(text, &none());
        assert_eq!(entries[0].institution, "Boston College");
    }

    #[test]
    fn test_state_code_in_address_is_not_a_degree() {
        let text = "Education\nBachelor of Arts in Economics\nBoston University, Boston, MA\n2019";
        let entries = extract_education(text, &none());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "Bachelor of Arts in Economics");
        assert_eq!(entries[0].institution, "Boston University");
        assert_eq!(entries[0].year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_abbreviation_after_institution_is_still_a_degree() {
        let entries = extract_education("Education\nHarvard University, MA 2012", &none());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "MA");
        assert_eq!(entries[0].institution, "Harvard University");

        let entries = extract_education("Education\nMS, Computer Science\nRice University", &none());
        assert_eq!(entries[0].degree, "MS");
    }

    #[test]
    fn test_abbreviations_are_case_sensitive() {
        assert!(extract_education("Education\nms word and ba tools", &none()).is_empty());
    }

    #[test]
    fn test_recognizer_organization_fills_institution() {
        let nlp = none().with_recognizer(Arc::new(FixedRecognizer(vec![entity(
            "ETH Zurich",
            EntityLabel::Organization,
        )])));
        let entries = extract_education("Education\nMSc Robotics\n- thesis on swarms", &nlp);
        assert_eq!(entries[0].institution, "ETH Zurich");
    }

    #[test]
    fn test_high_school_and_ged() {
        let entries = extract_education("Education\nHigh School Diploma\nGED 2010", &none());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].degree, "GED");
        assert_eq!(entries[1].year.as_deref(), Some("2010"));
    }
}
