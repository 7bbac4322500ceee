//! Rule-based field extractors for land-sale notices.

pub mod buyer;
pub mod numbers;
pub mod parcels;
pub mod patterns;
pub mod price;

pub use buyer::{BuyerStatus, BuyerStatusDetector, detect_buyer_status};
pub use numbers::{
    format_european_decimal, is_plausible_area, parse_area, parse_european_decimal,
    parse_price_literal,
};
pub use parcels::{ParcelExtractor, unique_parcel_ids};
pub use price::{TotalPriceExtractor, extract_total_price};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extracted value with its confidence and location.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Start offset, or 0 when the match carries no position.
    pub fn start(&self) -> usize {
        self.position.map(|(start, _)| start).unwrap_or(0)
    }

    /// End offset, or 0 when the match carries no position.
    pub fn end(&self) -> usize {
        self.position.map(|(_, end)| end).unwrap_or(0)
    }
}
