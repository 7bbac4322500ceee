//! Cadastral parcel number extraction.

use std::collections::HashSet;

use super::patterns::PARCEL_ID;
use super::{ExtractionMatch, FieldExtractor};

/// Parcel number extractor over the bare `block/sub-number` pattern.
pub struct ParcelExtractor {
    confidence: f32,
}

impl ParcelExtractor {
    pub fn new() -> Self {
        Self { confidence: 0.4 }
    }

    /// Set the confidence attached to each match.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Number of parcel-number occurrences, duplicates included.
    pub fn count(&self, text: &str) -> usize {
        PARCEL_ID.find_iter(text).count()
    }
}

impl Default for ParcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ParcelExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PARCEL_ID
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), self.confidence, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Distinct parcel numbers in order of first occurrence, at most `limit`.
pub fn unique_parcel_ids(text: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for caps in PARCEL_ID.captures_iter(text) {
        if ids.len() >= limit {
            break;
        }
        let id = &caps[1];
        if seen.insert(id.to_string()) {
            ids.push(id.to_string());
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_all_positions() {
        let text = "parc. 12/3 in 45/6";
        let found = ParcelExtractor::new().extract_all(text);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value, "12/3");
        assert_eq!(&text[found[1].start()..found[1].end()], "45/6");
    }

    #[test]
    fn test_unique_ids_keep_first_occurrence_order() {
        let text = "5/1 3/2 5/1 9/9 3/2";
        assert_eq!(unique_parcel_ids(text, 30), vec!["5/1", "3/2", "9/9"]);
        assert_eq!(unique_parcel_ids(text, 2), vec!["5/1", "3/2"]);
    }

    #[test]
    fn test_count_includes_duplicates() {
        assert_eq!(ParcelExtractor::new().count("1/1 1/1 1/1"), 3);
        assert_eq!(ParcelExtractor::new().count("brez parcel"), 0);
    }
}
