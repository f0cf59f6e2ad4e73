//! Job posting analysis: taxonomy keyword matching, seniority and education
//! requirements, responsibilities, and a complexity score.

pub mod analyzer;
pub mod complexity;
pub mod semantic;
pub mod taxonomy;

pub use analyzer::{analyze_keywords, parse_job_posting, JobPostingAnalyzer};
