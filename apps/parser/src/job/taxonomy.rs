//! Fixed vocabularies for job posting analysis. All entries are lowercase and
//! matched against normalized posting text.

/// Technical skill taxonomy: category → keywords. No keyword appears twice.
pub const TECHNICAL_SKILLS: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "go", "golang",
            "rust", "ruby", "php", "swift", "kotlin", "scala",
        ],
    ),
    (
        "web_frameworks",
        &[
            "react", "angular", "vue", "node", "django", "flask", "fastapi", "spring boot",
            "rails", "laravel", "svelte",
        ],
    ),
    (
        "databases",
        &[
            "sql", "mysql", "postgresql", "postgres", "mongodb", "redis", "sqlite", "oracle",
            "cassandra", "dynamodb", "elasticsearch",
        ],
    ),
    (
        "cloud_devops",
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "ci/cd",
            "ansible", "linux",
        ],
    ),
    (
        "data_science",
        &[
            "machine learning", "deep learning", "pandas", "numpy", "tensorflow", "pytorch",
            "scikit-learn", "spark", "tableau", "nlp",
        ],
    ),
    (
        "tools",
        &[
            "git", "github", "gitlab", "jira", "html", "css", "graphql", "rest api", "restful",
            "kafka", "figma",
        ],
    ),
];

pub const SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "analytical",
    "creative",
    "organized",
    "time management",
    "collaboration",
    "adaptability",
    "attention to detail",
    "critical thinking",
    "mentoring",
];

/// Seniority phrases, checked tier by tier in this order.
pub const ENTRY_PHRASES: &[&str] = &[
    "entry level",
    "entry-level",
    "junior",
    "jr.",
    "new grad",
    "recent graduate",
    "intern",
    "internship",
    "0-1 years",
    "0-2 years",
    "1-2 years",
    "1+ years",
];
pub const MID_PHRASES: &[&str] = &[
    "mid level",
    "mid-level",
    "intermediate",
    "experienced",
    "2-4 years",
    "3-5 years",
    "2+ years",
    "3+ years",
    "4+ years",
];
pub const SENIOR_PHRASES: &[&str] = &[
    "senior",
    "sr.",
    "lead",
    "principal",
    "staff engineer",
    "head of",
    "5+ years",
    "6+ years",
    "7+ years",
    "8+ years",
    "10+ years",
];

pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "associate degree",
    "diploma",
    "high school",
    "ged",
    "mba",
    "degree",
];

/// Degree abbreviations that collide with everyday words ("MS Office"), so
/// each is reported only when one of its context phrases appears.
pub const DEGREE_ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("bs", &["bs in", "bs degree", "b.s.", "bs/ms", "ms/bs", "bs or ms"]),
    ("ms", &["ms in", "ms degree", "m.s.", "bs/ms", "ms/bs", "bs or ms"]),
];

pub const FIELDS_OF_STUDY: &[&str] = &[
    "computer science",
    "engineering",
    "mathematics",
    "statistics",
    "information technology",
    "data science",
    "physics",
    "business",
    "economics",
];

pub const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certification",
    "certified",
    "license",
    "aws certified",
    "pmp",
    "cissp",
    "cpa",
    "scrum master",
];

/// Responsibility categories: category → verbs, matched with their inflections.
pub const RESPONSIBILITY_VERBS: &[(&str, &[&str])] = &[
    (
        "development",
        &["develop", "build", "implement", "code", "program", "deploy", "maintain", "create"],
    ),
    ("design", &["design", "architect", "prototype", "model", "plan"]),
    (
        "management",
        &["manage", "lead", "oversee", "coordinate", "direct", "supervise", "mentor"],
    ),
    (
        "analysis",
        &["analyze", "analyse", "evaluate", "assess", "investigate", "research", "review", "measure"],
    ),
    (
        "collaboration",
        &["collaborate", "partner", "work with", "communicate", "liaise", "support"],
    ),
];
