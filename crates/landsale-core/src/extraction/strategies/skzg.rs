//! SKZG offers: parcel table with an area column in m².

use crate::extraction::rules::patterns::AREA_WITH_UNIT;
use crate::extraction::rules::{FieldExtractor, ParcelExtractor, is_plausible_area, parse_area};
use crate::models::document::{PlotRecord, TemplateType};

use super::{ExtractionStrategy, StrategyOutput, window_end};

/// Characters after a parcel number searched for its area.
pub const AREA_CONTEXT_CHARS: usize = 100;

/// Strategy for the agricultural land fund's fixed-format offers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkzgStrategy;

impl SkzgStrategy {
    pub const CONFIDENCE: f32 = 0.7;

    pub fn new() -> Self {
        Self
    }

    // Starts after the parcel number: any lead-in window would contain the
    // parcel's own block number, which then reads as an area.
    fn area_after(text: &str, parcel_end: usize) -> Option<u32> {
        let context = &text[parcel_end..window_end(text, parcel_end, AREA_CONTEXT_CHARS)];
        let caps = AREA_WITH_UNIT.captures(context)?;
        parse_area(&caps[1]).filter(|area| is_plausible_area(*area))
    }
}

impl ExtractionStrategy for SkzgStrategy {
    fn template(&self) -> TemplateType {
        TemplateType::Skzg
    }

    fn plot_confidence(&self) -> f32 {
        Self::CONFIDENCE
    }

    fn extract(&self, text: &str) -> StrategyOutput {
        let plots = ParcelExtractor::new()
            .with_confidence(Self::CONFIDENCE)
            .extract_all(text)
            .into_iter()
            .map(|parcel| {
                let area = Self::area_after(text, parcel.end());
                PlotRecord::new(parcel.value, parcel.confidence).with_area(area)
            })
            .collect();
        StrategyOutput::from_plots(plots)
    }
}
