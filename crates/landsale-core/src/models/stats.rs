//! Aggregate counters over a set of extraction results.

use serde::Serialize;

use super::document::DocumentResult;

/// Counts reported after a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub with_plots: usize,
    pub with_areas: usize,
    pub with_price: usize,
    pub buyer_known: usize,
    pub high_confidence: usize,
    pub total_plots: usize,
    pub plots_with_area: usize,
}

impl BatchStats {
    /// Count `results`, treating scores at or above `high_confidence` as high.
    pub fn from_results<'a>(
        results: impl IntoIterator<Item = &'a DocumentResult>,
        high_confidence: f32,
    ) -> Self {
        let mut stats = Self::default();
        for result in results {
            stats.record(result, high_confidence);
        }
        stats
    }

    pub fn record(&mut self, result: &DocumentResult, high_confidence: f32) {
        self.total += 1;
        if !result.plots.is_empty() {
            self.with_plots += 1;
        }
        if result.has_plot_areas() {
            self.with_areas += 1;
        }
        if result.total_price.is_some() {
            self.with_price += 1;
        }
        if result.buyer_known {
            self.buyer_known += 1;
        }
        if result.confidence_score >= high_confidence {
            self.high_confidence += 1;
        }
        self.total_plots += result.plots.len();
        self.plots_with_area += result.plots_with_area();
    }

    /// Percentage of documents, 0 when there are none.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{PlotRecord, TemplateType};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn result(plots: Vec<PlotRecord>, price: Option<Decimal>, buyer: bool, score: f32) -> DocumentResult {
        DocumentResult {
            document_id: "x".to_string(),
            plots,
            total_price: price,
            total_area_m2: None,
            buyer_known: buyer,
            buyer_known_confidence: 0.5,
            template_type: TemplateType::Generic,
            confidence_score: score,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_counts() {
        let results = vec![
            result(Vec::new(), None, false, 0.1),
            result(
                vec![
                    PlotRecord::new("1/1", 0.9).with_area(Some(100)),
                    PlotRecord::new("1/2", 0.9),
                ],
                Some(Decimal::new(5000, 0)),
                true,
                0.95,
            ),
            result(vec![PlotRecord::new("7/7", 0.4)], None, false, 0.7),
        ];

        let stats = BatchStats::from_results(&results, 0.7);
        assert_eq!(
            stats,
            BatchStats {
                total: 3,
                with_plots: 2,
                with_areas: 1,
                with_price: 1,
                buyer_known: 1,
                high_confidence: 2,
                total_plots: 3,
                plots_with_area: 1,
            }
        );
        assert!((stats.percent(stats.with_plots) - 66.666).abs() < 0.01);
        assert_eq!(BatchStats::default().percent(0), 0.0);
    }
}
