//! Document-level confidence scoring.

use crate::models::document::DocumentResult;

/// Score for a notice with no parcels, whatever else was found.
pub const EMPTY_DOCUMENT_SCORE: f32 = 0.1;

const AREA_WEIGHT: f32 = 0.4;
const TOTAL_PRICE_WEIGHT: f32 = 0.3;
const BUYER_KNOWN_WEIGHT: f32 = 0.2;
const MULTIPLE_PLOTS_WEIGHT: f32 = 0.1;

/// Blends strategy trust (mean plot confidence) with evidence richness
/// (which optional facts were recovered).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Sum of the weights of the facts present in `result`, at most 1.0.
    pub fn completeness(&self, result: &DocumentResult) -> f32 {
        let mut completeness = 0.0;
        if result.has_plot_areas() {
            completeness += AREA_WEIGHT;
        }
        if result.total_price.is_some() {
            completeness += TOTAL_PRICE_WEIGHT;
        }
        if result.buyer_known {
            completeness += BUYER_KNOWN_WEIGHT;
        }
        if result.plots.len() >= 2 {
            completeness += MULTIPLE_PLOTS_WEIGHT;
        }
        completeness
    }

    /// Score a finalized result.
    pub fn score(&self, result: &DocumentResult) -> f32 {
        if result.plots.is_empty() {
            return EMPTY_DOCUMENT_SCORE;
        }

        let avg_plot_confidence =
            result.plots.iter().map(|p| p.confidence).sum::<f32>() / result.plots.len() as f32;

        ((avg_plot_confidence + self.completeness(result)) / 2.0).min(1.0)
    }
}
