//! Ordered fallback runner: try named strategies one after another and keep
//! the first success. Used for PDF text extraction and project splitting.

use thiserror::Error;
use tracing::{debug, warn};

pub type Strategy<I, T> = fn(&I) -> anyhow::Result<T>;

#[derive(Debug, Error)]
#[error("all {} strategies failed: {}", .failures.len(), summarize(.failures))]
pub struct CascadeExhausted {
    pub failures: Vec<(&'static str, String)>,
}

fn summarize(failures: &[(&'static str, String)]) -> String {
    failures
        .iter()
        .map(|(name, reason)| format!("{name}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub struct Cascade<I: ?Sized, T> {
    label: &'static str,
    strategies: Vec<(&'static str, Strategy<I, T>)>,
}

impl<I: ?Sized, T> Cascade<I, T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            strategies: Vec::new(),
        }
    }

    pub fn then(mut self, name: &'static str, strategy: Strategy<I, T>) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    /// Runs strategies in order. Returns the winning strategy's name with its output.
    pub fn run(&self, input: &I) -> Result<(&'static str, T), CascadeExhausted> {
        let mut failures = Vec::new();
        for (name, strategy) in &self.strategies {
            match strategy(input) {
                Ok(output) => {
                    debug!("{}: strategy '{}' succeeded", self.label, name);
                    return Ok((*name, output));
                }
                Err(e) => {
                    warn!("{}: strategy '{}' failed: {e:#}", self.label, name);
                    failures.push((*name, format!("{e:#}")));
                }
            }
        }
        Err(CascadeExhausted { failures })
    }
}
