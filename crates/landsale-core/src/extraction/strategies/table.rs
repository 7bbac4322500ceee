//! Table layout: parcel number followed by its area on the same row.

use tracing::debug;

use crate::extraction::rules::patterns::STANDALONE_NUMBER;
use crate::extraction::rules::{FieldExtractor, ParcelExtractor, is_plausible_area, parse_area};
use crate::models::document::{PlotRecord, TemplateType};

use super::generic::GenericStrategy;
use super::{ExtractionStrategy, StrategyOutput, window_end};

/// Characters after a parcel number searched for its area.
pub const ROW_CONTEXT_CHARS: usize = 100;
/// More plots than this means the density heuristic fired on noise.
pub const MAX_TABLE_PARCELS: usize = 50;

/// Table format strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatStrategy;

impl TableFormatStrategy {
    pub const CONFIDENCE: f32 = 0.6;

    pub fn new() -> Self {
        Self
    }

    fn row_area(text: &str, parcel_end: usize) -> Option<u32> {
        let context = &text[parcel_end..window_end(text, parcel_end, ROW_CONTEXT_CHARS)];
        let caps = STANDALONE_NUMBER.captures(context)?;
        parse_area(&caps[1]).filter(|area| is_plausible_area(*area))
    }
}

impl ExtractionStrategy for TableFormatStrategy {
    fn template(&self) -> TemplateType {
        TemplateType::TableFormat
    }

    fn plot_confidence(&self) -> f32 {
        Self::CONFIDENCE
    }

    fn extract(&self, text: &str) -> StrategyOutput {
        let plots: Vec<PlotRecord> = ParcelExtractor::new()
            .with_confidence(Self::CONFIDENCE)
            .extract_all(text)
            .into_iter()
            .map(|parcel| {
                let area = Self::row_area(text, parcel.end());
                PlotRecord::new(parcel.value, parcel.confidence).with_area(area)
            })
            .collect();

        if plots.is_empty() || plots.len() > MAX_TABLE_PARCELS {
            debug!(
                "Table layout produced {} plots, falling back to generic parcel discovery",
                plots.len()
            );
            let mut output = GenericStrategy::new().extract(text);
            output.notes.push(format!(
                "table layout produced {} plots; parcels taken from generic discovery",
                plots.len()
            ));
            return output;
        }

        StrategyOutput::from_plots(plots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn areas(output: &StrategyOutput) -> Vec<(String, Option<u32>)> {
        output
            .plots
            .iter()
            .map(|p| (p.parcel_id.clone(), p.area_m2))
            .collect()
    }

    #[test]
    fn test_rows_with_areas() {
        let text = "\
Parc. št. | Površina
1021/3 | 2540 m2
1021/4 | 613 m2
1022 /1 neberljivo
1030/2 | 1995
1031/7 | 18
1032/1 | 7200";
        let output = TableFormatStrategy::new().extract(text);

        assert_eq!(
            areas(&output),
            vec![
                ("1021/3".to_string(), Some(2540)),
                ("1021/4".to_string(), Some(613)),
                ("1030/2".to_string(), None),
                ("1031/7".to_string(), Some(18)),
                ("1032/1".to_string(), Some(7200)),
            ]
        );
        assert!(output.plots.iter().all(|p| p.confidence == 0.6));
        assert!(output.plots.iter().all(|p| p.price_eur.is_none() && p.share == "1/1"));
        assert!(output.notes.is_empty());
    }

    #[test]
    fn test_area_window_is_limited() {
        let text = format!("55/1{}4321", " ".repeat(120));
        let output = TableFormatStrategy::new().extract(&text);
        assert_eq!(output.plots[0].area_m2, None);

        let text = format!("55/1{}4321", " ".repeat(90));
        let output = TableFormatStrategy::new().extract(&text);
        assert_eq!(output.plots[0].area_m2, Some(4321));
    }

    #[test]
    fn test_keeps_duplicate_rows() {
        let text = "7/1 100\n7/1 200\n7/2 300\n7/3 400\n7/4 500";
        let output = TableFormatStrategy::new().extract(text);
        assert_eq!(output.plots.len(), 5);
        assert_eq!(output.plots[1].area_m2, Some(200));
    }

    #[test]
    fn test_overflow_falls_back_to_generic() {
        let text: String = (1..=60).map(|i| format!("{i}/2 ")).collect();
        let output = TableFormatStrategy::new().extract(&text);

        assert_eq!(output.plots.len(), 30);
        assert!(output.plots.iter().all(|p| p.confidence == 0.4));
        assert_eq!(output.notes.len(), 1);
    }

    #[test]
    fn test_empty_falls_back_to_generic() {
        let output = TableFormatStrategy::new().extract("ni parcel");
        assert!(output.plots.is_empty());
        assert_eq!(output.notes.len(), 1);
    }
}
