//! Complexity scoring for job postings. Deterministic and monotonic in every input.

use crate::models::job::{Complexity, ExperienceLevel, JobPostingProfile};

const POINTS_PER_SKILL: u32 = 2;
const SKILL_POINTS_CAP: u32 = 20;
const DEGREE_POINTS: u32 = 10;
const POINTS_PER_SOFT_SKILL: u32 = 1;

const HIGH_THRESHOLD: u32 = 40;
const MEDIUM_THRESHOLD: u32 = 25;

pub fn complexity_score(
    technical_skills: usize,
    level: ExperienceLevel,
    has_degree: bool,
    soft_skills: usize,
) -> u32 {
    let skill_points = (technical_skills as u32)
        .saturating_mul(POINTS_PER_SKILL)
        .min(SKILL_POINTS_CAP);
    let degree_points = if has_degree { DEGREE_POINTS } else { 0 };
    skill_points + level.weight() + degree_points + (soft_skills as u32) * POINTS_PER_SOFT_SKILL
}

pub fn classify(score: u32) -> Complexity {
    if score >= HIGH_THRESHOLD {
        Complexity::High
    } else if score >= MEDIUM_THRESHOLD {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}

/// Recomputes `complexity_score` and `complexity` from the profile's current fields.
pub fn rescore(profile: &mut JobPostingProfile) {
    let score = complexity_score(
        profile.technical_skill_count(),
        profile.experience_level,
        !profile.education_requirements.degrees.is_empty(),
        profile.soft_skills.len(),
    );
    profile.complexity_score = score;
    profile.complexity = classify(score);
}
