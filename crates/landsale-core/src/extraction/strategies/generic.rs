//! Fallback extraction: bare parcel numbers only.

use crate::extraction::rules::unique_parcel_ids;
use crate::models::document::{PlotRecord, TemplateType};

use super::{ExtractionStrategy, StrategyOutput};

/// Upper bound on parcels kept from unstructured text. Dense OCR noise
/// produces runaway `d/d` matches.
pub const MAX_GENERIC_PARCELS: usize = 30;

/// Generic strategy: deduplicated parcel numbers, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl GenericStrategy {
    pub const CONFIDENCE: f32 = 0.4;

    pub fn new() -> Self {
        Self
    }
}

impl ExtractionStrategy for GenericStrategy {
    fn template(&self) -> TemplateType {
        TemplateType::Generic
    }

    fn plot_confidence(&self) -> f32 {
        Self::CONFIDENCE
    }

    fn extract(&self, text: &str) -> StrategyOutput {
        let plots = unique_parcel_ids(text, MAX_GENERIC_PARCELS)
            .into_iter()
            .map(|id| PlotRecord::new(id, Self::CONFIDENCE))
            .collect();
        StrategyOutput::from_plots(plots)
    }
}
