//! Canonical word lists used by the résumé extractors.

/// Section names that terminate the section before them.
pub const MAJOR_SECTIONS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
    "awards",
    "volunteer",
    "publications",
    "languages",
    "references",
    "interests",
];

/// Words that mark a line as a job title.
pub const ROLE_KEYWORDS: &[&str] = &[
    "intern",
    "fellow",
    "instructor",
    "engineer",
    "developer",
    "analyst",
    "manager",
    "specialist",
    "coordinator",
    "assistant",
    "associate",
    "director",
    "consultant",
    "technician",
    "lead",
    "senior",
    "junior",
    "software",
    "data",
    "web",
    "full stack",
    "backend",
    "frontend",
    "machine learning",
    "scientist",
    "architect",
    "administrator",
    "designer",
    "researcher",
];

/// Verbs that open a typical accomplishment line.
pub const ACTION_VERBS: &[&str] = &[
    "researched",
    "demonstrated",
    "collaborated",
    "built",
    "developed",
    "implemented",
    "led",
    "mentored",
    "organized",
    "boosted",
    "increased",
    "created",
    "designed",
    "analyzed",
    "improved",
    "optimized",
    "managed",
    "reduced",
    "launched",
    "delivered",
];

pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "academy",
    "polytechnic",
    "conservatory",
];

/// Curated skill names scanned for when a skills section is thin.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
    "Swift",
    "Kotlin",
    "HTML",
    "CSS",
    "MATLAB",
    "R",
    "Scala",
    // Web
    "React",
    "Angular",
    "Vue.js",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "FastAPI",
    "Bootstrap",
    "Tailwind",
    "Next.js",
    // Databases
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "SQLite",
    "Oracle",
    // Cloud and DevOps
    "AWS",
    "Azure",
    "Google Cloud",
    "Docker",
    "Kubernetes",
    "Jenkins",
    "Git",
    "GitHub",
    "GitLab",
    // Data and AI
    "Machine Learning",
    "Data Analysis",
    "Pandas",
    "NumPy",
    "TensorFlow",
    "PyTorch",
    "Tableau",
    "Power BI",
    "Excel",
    "Matplotlib",
    "Jupyter",
    "LangChain",
    // Tools and practices
    "VS Code",
    "Figma",
    "API",
    "REST",
    "GraphQL",
    "Microservices",
    "Agile",
    "Scrum",
];

/// True when `text` starts with one of the action verbs, ignoring case.
pub fn starts_with_action_verb(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    ACTION_VERBS.iter().any(|v| {
        lower
            .strip_prefix(v)
            .is_some_and(|rest| rest.chars().next().map_or(true, |c| !c.is_alphanumeric()))
    })
}

/// True when any action verb appears as a whole word.
pub fn mentions_action_verb(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| ACTION_VERBS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_sections_are_lowercase() {
        assert!(MAJOR_SECTIONS.iter().all(|s| *s == s.to_lowercase()));
    }

    #[test]
    fn test_action_verb_prefix_respects_word_boundary() {
        assert!(starts_with_action_verb("Built APIs"));
        assert!(starts_with_action_verb("led the migration"));
        assert!(!starts_with_action_verb("Leduc Industries"));
    }

    #[test]
    fn test_action_verb_mention_is_whole_word() {
        assert!(mentions_action_verb("Team of five, I managed releases"));
        assert!(!mentions_action_verb("Unmanaged infrastructure"));
    }

    #[test]
    fn test_skill_vocabulary_has_no_normalized_duplicates() {
        let keys: Vec<String> = SKILL_VOCABULARY
            .iter()
            .map(|s| crate::resume::normalize::normalize_key(s))
            .collect();
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(keys.len(), unique.len());
    }
}
