use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::PersonalInfo;
use crate::nlp_client::{EntityLabel, NlpCapabilities};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});
static PHONE_DOMESTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?1[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}").expect("valid regex")
});
static PHONE_INTERNATIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d{1,3}[-. ]?\d{3,4}[-. ]?\d{3,4}[-. ]?\d{3,4}").expect("valid regex")
});
static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[\w-]+").expect("valid regex")
});

const NAME_SCAN_LINES: usize = 5;

/// Contact details. Name and location prefer the entity recognizer when present.
pub fn extract_personal_info(text: &str, nlp: &NlpCapabilities) -> PersonalInfo {
    let entities = nlp.recognize_entities(text);
    let first_entity = |label: EntityLabel| {
        entities.as_ref().and_then(|ents| {
            ents.iter()
                .find(|e| e.label == label)
                .map(|e| e.text.trim().to_string())
                .filter(|t| !t.is_empty())
        })
    };

    let name = if entities.is_some() {
        first_entity(EntityLabel::Person)
    } else {
        name_from_header(text)
    };

    PersonalInfo {
        name,
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        phone: extract_phone(text),
        linkedin_url: LINKEDIN.find(text).map(|m| m.as_str().to_string()),
        location: first_entity(EntityLabel::Location),
    }
}

/// First phone match, digits only. Domestic matches take precedence.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_DOMESTIC
        .find_iter(text)
        .chain(PHONE_INTERNATIONAL.find_iter(text))
        .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect::<String>())
        .find(|digits| !digits.is_empty())
}

/// A line of exactly two alphabetic tokens near the top of the document.
fn name_from_header(text: &str) -> Option<String> {
    text.lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            tokens.len() == 2 && tokens.iter().all(|t| t.chars().all(char::is_alphabetic))
        })
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
}
