//! Optional NLP capabilities: a named-entity recognizer and a semantic text
//! encoder. Both are consumed as black boxes and either may be absent; every
//! caller has a keyword/regex path that works without them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::errors::ParseError;

pub mod embedding;

pub use embedding::EmbeddingClient;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Encoder returned {got} embeddings for {expected} inputs")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Component failed: {0}")]
    Component(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Named-entity recognizer over plain text.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, NlpError>;
}

/// Sentence encoder producing one vector per input, in input order.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, NlpError>;
}

/// Capability handle built once at startup and shared read-only.
#[derive(Clone, Default)]
pub struct NlpCapabilities {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    encoder: Option<Arc<dyn TextEncoder>>,
}

impl NlpCapabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn TextEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn has_entity_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn encoder(&self) -> Option<&Arc<dyn TextEncoder>> {
        self.encoder.as_ref()
    }

    /// Runs the recognizer if one is configured.
    /// A recognizer failure is logged and treated like an absent recognizer.
    pub fn recognize_entities(&self, text: &str) -> Option<Vec<Entity>> {
        let recognizer = self.recognizer.as_ref()?;
        match recognizer.recognize(text) {
            Ok(entities) => Some(entities),
            Err(e) => {
                warn!("{}; falling back to patterns", ParseError::from(e));
                None
            }
        }
    }
}

impl std::fmt::Debug for NlpCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NlpCapabilities")
            .field("entity_recognizer", &self.has_entity_recognizer())
            .field("encoder", &self.has_encoder())
            .finish()
    }
}

/// Cosine similarity of two vectors; 0.0 when lengths differ or either is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Recognizer returning a fixed entity list.
    pub struct FixedRecognizer(pub Vec<Entity>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<Entity>, NlpError> {
            Ok(self.0.clone())
        }
    }

    pub struct FailingRecognizer;

    impl EntityRecognizer for FailingRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<Entity>, NlpError> {
            Err(NlpError::Component("model not loaded".to_string()))
        }
    }

    pub fn entity(text: &str, label: EntityLabel) -> Entity {
        Entity {
            text: text.to_string(),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_none_has_no_capabilities() {
        let nlp = NlpCapabilities::none();
        assert!(!nlp.has_entity_recognizer());
        assert!(!nlp.has_encoder());
        assert!(nlp.recognize_entities("Jane Doe").is_none());
    }

    #[test]
    fn test_recognizer_entities_are_returned() {
        let nlp = NlpCapabilities::none().with_recognizer(Arc::new(FixedRecognizer(vec![
            entity("Jane Doe", EntityLabel::Person),
        ])));
        let entities = nlp.recognize_entities("Jane Doe").unwrap();
        assert_eq!(entities[0].label, EntityLabel::Person);
    }

    #[test]
    fn test_failing_recognizer_degrades_to_none() {
        let nlp = NlpCapabilities::none().with_recognizer(Arc::new(FailingRecognizer));
        assert!(nlp.has_entity_recognizer());
        assert!(nlp.recognize_entities("anything").is_none());
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
