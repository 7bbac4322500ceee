//! Extraction orchestrator: classify, dispatch, attach, score.

use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentResult, TemplateType};

use super::DocumentExtractor;
use super::classifier::TemplateClassifier;
use super::rules::{BuyerStatusDetector, FieldExtractor, TotalPriceExtractor};
use super::scoring::ConfidenceScorer;
use super::strategies::{
    ElectronicFormStrategy, ExtractionStrategy, GenericStrategy, SkzgStrategy,
    TableFormatStrategy,
};

/// Land-sale notice extraction engine.
///
/// Holds no per-document state; one engine can serve any number of threads.
pub struct ExtractionEngine {
    classifier: TemplateClassifier,
    electronic: ElectronicFormStrategy,
    table: TableFormatStrategy,
    skzg: SkzgStrategy,
    generic: GenericStrategy,
    price: TotalPriceExtractor,
    buyer: BuyerStatusDetector,
    scorer: ConfidenceScorer,
}

impl ExtractionEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self {
            classifier: TemplateClassifier::new(),
            electronic: ElectronicFormStrategy::new(),
            table: TableFormatStrategy::new(),
            skzg: SkzgStrategy::new(),
            generic: GenericStrategy::new(),
            price: TotalPriceExtractor::new(),
            buyer: BuyerStatusDetector::new(),
            scorer: ConfidenceScorer::new(),
        }
    }

    /// Create an engine from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_field_anchoring(config.anchor_electronic_fields)
            .with_alignment_notes(config.note_aligned_fields)
    }

    /// Set electronic-form field anchoring.
    pub fn with_field_anchoring(mut self, anchor: bool) -> Self {
        self.electronic = self.electronic.with_anchoring(anchor);
        self
    }

    /// Set alignment notes for electronic forms.
    pub fn with_alignment_notes(mut self, note: bool) -> Self {
        self.electronic = self.electronic.with_alignment_notes(note);
        self
    }

    fn strategy_for(&self, template: TemplateType) -> &dyn ExtractionStrategy {
        match template {
            TemplateType::ElectronicForm => &self.electronic,
            TemplateType::TableFormat => &self.table,
            TemplateType::Skzg => &self.skzg,
            TemplateType::Generic => &self.generic,
        }
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for ExtractionEngine {
    fn extract(&self, text: &str, document_id: &str) -> DocumentResult {
        debug!("Extracting {} from {} characters of text", document_id, text.len());

        let template_type = self.classifier.classify(text);
        let strategy = self.strategy_for(template_type);
        debug_assert_eq!(strategy.template(), template_type);
        trace!(
            "Dispatching {} to {} strategy (plot confidence {:.1})",
            document_id,
            strategy.template(),
            strategy.plot_confidence()
        );

        let output = strategy.extract(text);
        let buyer = self.buyer.detect(text);

        let total_price = self.price.extract(text).map(|found| {
            debug!(
                "Total price {} from {:?} (confidence {:.2})",
                found.value, found.source, found.confidence
            );
            found.value
        });

        let mut result = DocumentResult {
            document_id: document_id.to_string(),
            plots: output.plots,
            total_price,
            total_area_m2: output.total_area_m2,
            buyer_known: buyer.known,
            buyer_known_confidence: buyer.confidence,
            template_type,
            confidence_score: 0.0,
            notes: output.notes,
        };
        result.confidence_score = self.scorer.score(&result);

        debug!(
            "Extracted {} as {}: {} plots, price {:?}, buyer known {}, confidence {:.2}",
            result.document_id,
            result.template_type,
            result.plots.len(),
            result.total_price,
            result.buyer_known,
            result.confidence_score
        );

        result
    }
}
