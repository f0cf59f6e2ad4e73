//! Résumé parsing: segment the text into sections, run the field extractors,
//! and assemble a `StructuredRecord`.

use std::path::Path;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ParseError;
use crate::extraction::{extract, load_document};
use crate::models::document::RawDocument;
use crate::models::resume::{ParseOutcome, StructuredRecord};
use crate::nlp_client::NlpCapabilities;

pub mod assembler;
pub mod blocks;
pub mod education;
pub mod experience;
pub mod lists;
pub mod normalize;
pub mod personal;
pub mod projects;
pub mod sections;
pub mod skills;
pub mod vocabulary;

use assembler::{assemble, ExtractedFields};

/// Stateless résumé parser. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ResumeParser {
    config: Config,
    nlp: NlpCapabilities,
}

impl ResumeParser {
    pub fn new(config: Config, nlp: NlpCapabilities) -> Self {
        Self { config, nlp }
    }

    pub fn parse_file(
        &self,
        path: &Path,
        owner_id: Option<Uuid>,
    ) -> Result<StructuredRecord, ParseError> {
        let doc = load_document(path)?;
        self.parse_document(&doc, owner_id)
    }

    pub fn parse_document(
        &self,
        doc: &RawDocument,
        owner_id: Option<Uuid>,
    ) -> Result<StructuredRecord, ParseError> {
        let text = extract(doc)?;
        if text.trim().is_empty() {
            return Err(ParseError::EmptyExtraction(doc.source.clone()));
        }
        Ok(self.parse_text_inner(text, &doc.source, doc.size(), owner_id))
    }

    /// Plain-text path, for text that was extracted elsewhere.
    pub fn parse_text(
        &self,
        text: &str,
        source: &str,
        owner_id: Option<Uuid>,
    ) -> Result<StructuredRecord, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyExtraction(source.to_string()));
        }
        Ok(self.parse_text_inner(text.to_string(), source, text.len() as u64, owner_id))
    }

    fn parse_text_inner(
        &self,
        text: String,
        source: &str,
        file_size: u64,
        owner_id: Option<Uuid>,
    ) -> StructuredRecord {
        let fields = ExtractedFields {
            personal_info: personal::extract_personal_info(&text, &self.nlp),
            experience: experience::extract_experience(&text),
            education: education::extract_education(&text, &self.nlp),
            skills: skills::extract_skills(&text, self.config.max_skills),
            certifications: lists::extract_certifications(&text),
            awards: lists::extract_awards(&text),
            projects: projects::extract_projects(&text),
        };

        info!(
            "Parsed {source}: {} jobs, {} degrees, {} skills, {} projects",
            fields.experience.len(),
            fields.education.len(),
            fields.skills.len(),
            fields.projects.len()
        );

        assemble(fields, text, source, file_size, owner_id)
    }
}

/// Parses a résumé file with default settings. Never returns an error.
pub fn parse_resume(path: impl AsRef<Path>, owner_id: Option<Uuid>) -> ParseOutcome {
    outcome(ResumeParser::default().parse_file(path.as_ref(), owner_id))
}

/// Parses already-extracted résumé text with default settings. Never returns an error.
pub fn parse_resume_text(text: &str, source: &str, owner_id: Option<Uuid>) -> ParseOutcome {
    outcome(ResumeParser::default().parse_text(text, source, owner_id))
}

fn outcome(result: Result<StructuredRecord, ParseError>) -> ParseOutcome {
    match result {
        Ok(record) => ParseOutcome::parsed(record),
        Err(e) if e.is_fatal() => {
            warn!("Resume parsing failed: {e}");
            ParseOutcome::failed(&e)
        }
        // Recoverable errors are handled inside the extractors; one reaching here is a bug.
        Err(e) => {
            error!("Recoverable error escaped the extractors: {e}");
            ParseOutcome::failed(&e)
        }
    }
}
