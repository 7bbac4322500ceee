//! Land-sale notice field extraction module.

pub mod classifier;
mod engine;
pub mod rules;
pub mod scoring;
pub mod strategies;

pub use classifier::TemplateClassifier;
pub use engine::ExtractionEngine;
pub use scoring::ConfidenceScorer;
pub use strategies::{ExtractionStrategy, StrategyOutput};

use crate::models::document::DocumentResult;

/// Trait for notice extractors.
pub trait DocumentExtractor: Send + Sync {
    /// Extract structured facts from OCR text. Total: malformed or empty
    /// text yields a minimally populated, low-confidence result.
    fn extract(&self, text: &str, document_id: &str) -> DocumentResult;
}
