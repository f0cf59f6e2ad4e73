//! Semantic soft-skill matching. Best-effort: any failure leaves the keyword
//! profile untouched.

use std::time::Duration;

use tracing::{info, warn};

use super::complexity::rescore;
use super::taxonomy::SOFT_SKILLS;
use crate::errors::ParseError;
use crate::models::job::JobPostingProfile;
use crate::nlp_client::{cosine_similarity, NlpError, TextEncoder};

pub const SEMANTIC_MODE: &str = "semantic";

/// Soft-skill phrases whose embedding is within `threshold` of the posting's.
/// The posting and every phrase go to the encoder in one call.
pub async fn match_soft_skills(
    encoder: &dyn TextEncoder,
    text: &str,
    threshold: f32,
) -> Result<Vec<String>, NlpError> {
    let inputs: Vec<String> = std::iter::once(text.to_string())
        .chain(SOFT_SKILLS.iter().map(|s| s.to_string()))
        .collect();

    let embeddings = encoder.embed(&inputs).await?;
    if embeddings.len() != inputs.len() {
        return Err(NlpError::ShapeMismatch {
            expected: inputs.len(),
            got: embeddings.len(),
        });
    }

    let (posting, phrases) = embeddings.split_at(1);
    Ok(SOFT_SKILLS
        .iter()
        .zip(phrases)
        .filter(|(_, vector)| cosine_similarity(&posting[0], vector) >= threshold)
        .map(|(skill, _)| skill.to_string())
        .collect())
}

/// Merges semantic matches into `profile` under a wall-clock budget.
/// Returns whether the semantic pass was applied.
pub async fn refine(
    profile: &mut JobPostingProfile,
    text: &str,
    encoder: &dyn TextEncoder,
    threshold: f32,
    budget: Duration,
) -> bool {
    let matches = match tokio::time::timeout(budget, match_soft_skills(encoder, text, threshold)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            warn!("{}; keeping keyword result", ParseError::from(e));
            return false;
        }
        Err(_) => {
            warn!("Semantic soft-skill matching timed out after {budget:?}, keeping keyword result");
            return false;
        }
    };

    let before = profile.soft_skills.len();
    for skill in matches {
        if !profile.soft_skills.contains(&skill) {
            profile.soft_skills.push(skill);
        }
    }
    rescore(profile);
    profile.analysis_mode = SEMANTIC_MODE.to_string();

    info!(
        "Semantic pass added {} soft skills",
        profile.soft_skills.len() - before
    );
    true
}
