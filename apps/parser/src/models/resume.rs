use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ParseError;

pub const INSTITUTION_NOT_SPECIFIED: &str = "Institution not specified";
pub const NO_PROJECT_DESCRIPTION: &str = "No description available";

/// Contact details pulled from the top of a résumé.
/// Missing fields stay `None`; an empty string is never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
}

/// Provenance and size facts attached to every parsed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseMetadata {
    pub source: String,
    pub file_name: String,
    pub file_size: u64,
    /// RFC 3339 UTC timestamp.
    pub parsed_at: String,
    pub owner_id: Option<Uuid>,
    pub character_count: usize,
    pub word_count: usize,
}

/// The normalized result of parsing one résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub awards: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub raw_text: String,
    pub metadata: ParseMetadata,
}

impl StructuredRecord {
    /// Plain nested mapping for the persistence layer.
    pub fn to_persistable(&self) -> Result<serde_json::Value, ParseError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Boundary shape handed to callers that must never see an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub success: bool,
    pub data: Option<StructuredRecord>,
    pub message: String,
}

impl ParseOutcome {
    pub fn parsed(record: StructuredRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            message: "Resume parsed successfully".to_string(),
        }
    }

    pub fn failed(err: &ParseError) -> Self {
        Self {
            success: false,
            data: None,
            message: format!("Resume parsing failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StructuredRecord {
        StructuredRecord {
            personal_info: PersonalInfo {
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
            experience: vec![],
            education: vec![EducationEntry {
                degree: "BS Computer Science".to_string(),
                institution: INSTITUTION_NOT_SPECIFIED.to_string(),
                year: Some("2019".to_string()),
                gpa: None,
            }],
            skills: vec!["Rust".to_string()],
            certifications: vec![],
            awards: vec![],
            projects: vec![],
            raw_text: "Jane".to_string(),
            metadata: ParseMetadata {
                source: "/tmp/jane.pdf".to_string(),
                file_name: "jane.pdf".to_string(),
                file_size: 10,
                parsed_at: "2024-01-01T00:00:00+00:00".to_string(),
                owner_id: None,
                character_count: 4,
                word_count: 1,
            },
        }
    }

    #[test]
    fn test_persistable_keeps_missing_fields_as_null() {
        let value = sample_record().to_persistable().unwrap();
        assert_eq!(value["personal_info"]["email"], "jane@example.com");
        assert!(value["personal_info"]["name"].is_null());
        assert_eq!(value["education"][0]["institution"], "Institution not specified");
        assert_eq!(value["metadata"]["word_count"], 1);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: StructuredRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_failed_outcome_has_no_data() {
        let outcome = ParseOutcome::failed(&ParseError::UnsupportedFormat(".txt".to_string()));
        assert!(!outcome.success);
        assert!(outcome.data.is_none());
        assert_eq!(
            outcome.message,
            "Resume parsing failed: Unsupported file format: .txt"
        );
    }
}
