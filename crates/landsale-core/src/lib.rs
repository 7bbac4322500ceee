//! Core library for land-sale notice extraction.
//!
//! This crate provides:
//! - Template classification of OCR text from land-sale notices
//! - Per-template parcel, area, price and share extraction
//! - Total price and buyer-known detection
//! - Document-level confidence scoring
//! - Result models, configuration and the incremental results database

pub mod error;
pub mod extraction;
pub mod models;

pub use error::{LandsaleError, Result};
pub use extraction::{DocumentExtractor, ExtractionEngine, TemplateClassifier};
pub use models::config::LandsaleConfig;
pub use models::database::ExtractionDatabase;
pub use models::document::{DocumentResult, PlotRecord, TemplateType};
pub use models::stats::BatchStats;

/// Extract structured facts from one notice with default settings.
pub fn extract(text: &str, document_id: &str) -> DocumentResult {
    ExtractionEngine::new().extract(text, document_id)
}
