//! Detection of the "kupec je znan" (buyer is known) statement.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use super::patterns::{BUYER_KNOWN_EXPLICIT, BUYER_KNOWN_LOOSE, BUYER_NOT_KNOWN};
use super::{ExtractionMatch, FieldExtractor};

/// Buyer-known decision with its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuyerStatus {
    pub known: bool,
    pub confidence: f32,
}

impl BuyerStatus {
    /// Decision when the notice says nothing about the buyer.
    ///
    /// Silence counts as weak evidence that no buyer is known.
    pub const UNSTATED: BuyerStatus = BuyerStatus {
        known: false,
        confidence: 0.5,
    };
}

/// One guard/decision pair of the detector.
pub struct BuyerRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub status: BuyerStatus,
}

lazy_static! {
    /// Detector rules, first match wins.
    pub static ref BUYER_RULES: [BuyerRule; 3] = [
        BuyerRule {
            name: "explicit_known",
            pattern: &BUYER_KNOWN_EXPLICIT,
            status: BuyerStatus { known: true, confidence: 0.95 },
        },
        BuyerRule {
            name: "loose_known",
            pattern: &BUYER_KNOWN_LOOSE,
            status: BuyerStatus { known: true, confidence: 0.8 },
        },
        BuyerRule {
            name: "explicit_not_known",
            pattern: &BUYER_NOT_KNOWN,
            status: BuyerStatus { known: false, confidence: 0.9 },
        },
    ];
}

/// Buyer status detector.
pub struct BuyerStatusDetector;

impl BuyerStatusDetector {
    pub fn new() -> Self {
        Self
    }

    /// Decide the buyer status, falling back to [`BuyerStatus::UNSTATED`].
    pub fn detect(&self, text: &str) -> BuyerStatus {
        self.extract(text)
            .map(|m| m.value)
            .unwrap_or(BuyerStatus::UNSTATED)
    }
}

impl Default for BuyerStatusDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BuyerStatusDetector {
    type Output = ExtractionMatch<BuyerStatus>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        BUYER_RULES.iter().find_map(|rule| {
            let m = rule.pattern.find(text)?;
            trace!("Buyer rule {} matched at {}", rule.name, m.start());
            Some(
                ExtractionMatch::new(rule.status, rule.status.confidence, m.as_str())
                    .with_position(m.start(), m.end()),
            )
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Detect whether the notice states that a buyer is known.
pub fn detect_buyer_status(text: &str) -> BuyerStatus {
    BuyerStatusDetector::new().detect(text)
}
