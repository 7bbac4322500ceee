//! Document-level total price extraction.

use rust_decimal::Decimal;
use tracing::trace;

use super::numbers::parse_european_decimal;
use super::patterns::{AMOUNT_WITH_CURRENCY, TOTAL_PRICE_LABELED};
use super::{ExtractionMatch, FieldExtractor};

/// Unlabelled amounts below this are phone numbers, dates and the like.
const MIN_BARE_AMOUNT: i64 = 100;

/// Total price extractor.
///
/// A "Cena skupaj:" label wins over any bare amount followed by a currency.
pub struct TotalPriceExtractor;

impl TotalPriceExtractor {
    pub fn new() -> Self {
        Self
    }

    fn labeled(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        let caps = TOTAL_PRICE_LABELED.captures(text)?;
        let literal = caps.get(1)?;
        let value = parse_european_decimal(literal.as_str())?;
        let full = caps.get(0)?;
        Some(ExtractionMatch::new(value, 0.95, full.as_str()).with_position(full.start(), full.end()))
    }

    fn bare(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        let caps = AMOUNT_WITH_CURRENCY.captures(text)?;
        let value = parse_european_decimal(&caps[1])?;
        if value < Decimal::from(MIN_BARE_AMOUNT) {
            trace!("Rejected bare amount {} below floor", value);
            return None;
        }
        let full = caps.get(0)?;
        Some(ExtractionMatch::new(value, 0.7, full.as_str()).with_position(full.start(), full.end()))
    }
}

impl Default for TotalPriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalPriceExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.labeled(text).or_else(|| self.bare(text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Extract the total price stated on a notice.
pub fn extract_total_price(text: &str) -> Option<Decimal> {
    TotalPriceExtractor::new().extract(text).map(|m| m.value)
}
