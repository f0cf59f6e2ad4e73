//! Small text helpers shared by the résumé extractors.

use std::collections::HashSet;

const BULLETS: &[char] = &['•', '-', '*', '▪', '◦', '‣', '·', '●', '○', '■', '–', '►', '✓'];

/// Dedup key: lowercase, whitespace and punctuation dropped.
/// `+` and `#` survive so that "C", "C++" and "C#" stay distinct.
pub fn normalize_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keeps the first occurrence of each normalized key, in order.
pub fn dedup_normalized(items: Vec<String>) -> Vec<String> {
    dedup_by(items, |s| normalize_key(s))
}

/// Keeps the first occurrence of each exact value, in order.
pub fn dedup_exact(items: Vec<String>) -> Vec<String> {
    dedup_by(items, |s| s.clone())
}

pub fn dedup_by<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

pub fn is_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLETS)
}

pub fn strip_bullet(line: &str) -> &str {
    line.trim().trim_start_matches(BULLETS).trim_start()
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// `needle` occurs with no letter, digit, `+` or `#` on either side.
pub fn contains_token(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(i, _)| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(is_token_char) && !after.is_some_and(is_token_char)
    })
}

/// Trimmed, non-empty lines of a block of text.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_ignores_case_space_and_punctuation() {
        assert_eq!(normalize_key("Node.js"), normalize_key("nodejs"));
        assert_eq!(normalize_key("Machine  Learning"), normalize_key("machine-learning"));
        assert_ne!(normalize_key("C++"), normalize_key("C"));
        assert_ne!(normalize_key("C#"), normalize_key("C++"));
    }

    #[test]
    fn test_dedup_normalized_keeps_first_spelling() {
        let items = vec!["React".to_string(), "react".to_string(), "Vue.js".to_string(), "VueJS".to_string()];
        assert_eq!(dedup_normalized(items), vec!["React", "Vue.js"]);
    }

    #[test]
    fn test_dedup_exact_is_case_sensitive() {
        let items = vec!["AWS".to_string(), "aws".to_string(), "AWS".to_string()];
        assert_eq!(dedup_exact(items), vec!["AWS", "aws"]);
    }

    #[test]
    fn test_bullets_are_detected_and_stripped() {
        assert!(is_bullet("  • Built APIs"));
        assert!(is_bullet("- Shipped"));
        assert!(!is_bullet("Built APIs"));
        assert_eq!(strip_bullet("•  Built APIs "), "Built APIs");
        assert_eq!(strip_bullet("** Led team"), "Led team");
    }

    #[test]
    fn test_contains_token_respects_boundaries() {
        assert!(contains_token("python, c++ and go", "c++"));
        assert!(contains_token("python, c++ and go", "go"));
        assert!(!contains_token("mysql", "sql"));
        assert!(!contains_token("c++", "c"));
        assert!(contains_token("5+ years of rust", "5+ years"));
        assert!(!contains_token("15+ years", "5+ years"));
    }

    #[test]
    fn test_content_lines_drops_blank_lines() {
        assert_eq!(content_lines(" a \n\n  \nb"), vec!["a", "b"]);
    }
}
