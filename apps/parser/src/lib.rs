pub mod config;
pub mod errors;
pub mod extraction;
pub mod job;
pub mod models;
pub mod nlp_client;
pub mod resume;

pub use config::Config;
pub use errors::ParseError;
pub use job::{parse_job_posting, JobPostingAnalyzer};
pub use models::job::JobPostingProfile;
pub use models::resume::{ParseOutcome, StructuredRecord};
pub use nlp_client::NlpCapabilities;
pub use resume::{parse_resume, parse_resume_text, ResumeParser};
