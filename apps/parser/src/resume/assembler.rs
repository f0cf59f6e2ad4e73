//! Result Assembler: folds extractor output and provenance into a `StructuredRecord`.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::models::resume::{
    EducationEntry, ExperienceEntry, ParseMetadata, PersonalInfo, ProjectEntry,
    StructuredRecord,
};

/// Everything the field extractors produced for one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub awards: Vec<String>,
    pub projects: Vec<ProjectEntry>,
}

/// Moves the fields into a record and stamps metadata. No filtering happens here.
pub fn assemble(
    fields: ExtractedFields,
    raw_text: String,
    source: &str,
    file_size: u64,
    owner_id: Option<Uuid>,
) -> StructuredRecord {
    let metadata = ParseMetadata {
        source: source.to_string(),
        file_name: file_name(source),
        file_size,
        parsed_at: Utc::now().to_rfc3339(),
        owner_id,
        character_count: raw_text.chars().count(),
        word_count: raw_text.split_whitespace().count(),
    };

    StructuredRecord {
        personal_info: fields.personal_info,
        experience: fields.experience,
        education: fields.education,
        skills: fields.skills,
        certifications: fields.certifications,
        awards: fields.awards,
        projects: fields.projects,
        raw_text,
        metadata,
    }
}

fn file_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_counts_and_file_name() {
        let owner = Uuid::new_v4();
        let record = assemble(
            ExtractedFields::default(),
            "Jane  Smith\nRust engineer ü".to_string(),
            "/uploads/cv/jane.pdf",
            2048,
            Some(owner),
        );
        let meta = &record.metadata;
        assert_eq!(meta.file_name, "jane.pdf");
        assert_eq!(meta.source, "/uploads/cv/jane.pdf");
        assert_eq!(meta.file_size, 2048);
        assert_eq!(meta.owner_id, Some(owner));
        assert_eq!(meta.word_count, 5);
        assert_eq!(meta.character_count, 27);
        assert!(chrono::DateTime::parse_from_rfc3339(&meta.parsed_at).is_ok());
    }

    #[test]
    fn test_fields_move_through_unchanged() {
        let fields = ExtractedFields {
            skills: vec!["Rust".to_string(), "rust".to_string()],
            awards: vec!["Dean's List".to_string()],
            ..Default::default()
        };
        let record = assemble(fields, String::new(), "inline", 0, None);
        assert_eq!(record.skills, vec!["Rust", "rust"]);
        assert_eq!(record.awards, vec!["Dean's List"]);
        assert_eq!(record.metadata.file_name, "inline");
        assert_eq!(record.metadata.word_count, 0);
    }
}
