use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Seniority tier inferred from a job posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    #[default]
    NotSpecified,
}

impl ExperienceLevel {
    /// Points this tier contributes to the complexity score.
    pub fn weight(self) -> u32 {
        match self {
            ExperienceLevel::Entry => 5,
            ExperienceLevel::Mid => 10,
            ExperienceLevel::Senior => 15,
            ExperienceLevel::NotSpecified => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRequirements {
    pub degrees: Vec<String>,
    pub fields: Vec<String>,
    pub certifications: Vec<String>,
}

/// Structured view of a job posting.
/// Category maps only hold categories with at least one hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostingProfile {
    pub technical_skills: BTreeMap<String, Vec<String>>,
    pub soft_skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub education_requirements: EducationRequirements,
    pub responsibilities: BTreeMap<String, Vec<String>>,
    pub complexity: Complexity,
    pub complexity_score: u32,
    /// "keyword" | "semantic"
    pub analysis_mode: String,
    pub raw_text_length: usize,
}

impl JobPostingProfile {
    pub fn technical_skill_count(&self) -> usize {
        self.technical_skills.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_serializes_snake_case() {
        let json = serde_json::to_string(&ExperienceLevel::NotSpecified).unwrap();
        assert_eq!(json, r#""not_specified""#);
        let level: ExperienceLevel = serde_json::from_str(r#""senior""#).unwrap();
        assert_eq!(level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_tier_weights_increase_with_seniority() {
        assert!(ExperienceLevel::Entry.weight() < ExperienceLevel::Mid.weight());
        assert!(ExperienceLevel::Mid.weight() < ExperienceLevel::Senior.weight());
        assert_eq!(ExperienceLevel::NotSpecified.weight(), 0);
    }

    #[test]
    fn test_complexity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Complexity::High).unwrap(), r#""high""#);
    }
}
