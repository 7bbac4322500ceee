//! Template classification by ordered layout signatures.

use tracing::debug;

use crate::models::document::TemplateType;

use super::rules::ParcelExtractor;
use super::rules::patterns::{
    DOCUMENT_MARK, ELECTRONIC_SIGNATURE, SKZG_FUND_NAME, SKZG_OFFER_NUMBER,
};

/// Parcel-number occurrences from which a notice is read as a table.
pub const TABLE_MIN_PARCELS: usize = 5;

/// One guard/label pair of the classifier.
pub struct TemplateRule {
    pub name: &'static str,
    pub template: TemplateType,
    pub matches: fn(&str) -> bool,
}

/// Classifier rules, first match wins. Electronic-form markers are the most
/// specific; parcel density is the weakest signal and is checked last.
pub const TEMPLATE_RULES: &[TemplateRule] = &[
    TemplateRule {
        name: "electronic_signature",
        template: TemplateType::ElectronicForm,
        matches: |text| ELECTRONIC_SIGNATURE.is_match(text),
    },
    TemplateRule {
        name: "document_mark",
        template: TemplateType::ElectronicForm,
        matches: |text| DOCUMENT_MARK.is_match(text),
    },
    TemplateRule {
        name: "skzg_fund_name",
        template: TemplateType::Skzg,
        matches: |text| SKZG_FUND_NAME.is_match(text),
    },
    TemplateRule {
        name: "skzg_offer_number",
        template: TemplateType::Skzg,
        matches: |text| SKZG_OFFER_NUMBER.is_match(text),
    },
    TemplateRule {
        name: "parcel_density",
        template: TemplateType::TableFormat,
        matches: |text| ParcelExtractor::new().count(text) >= TABLE_MIN_PARCELS,
    },
];

/// Assigns exactly one template label to a notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateClassifier;

impl TemplateClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `text`, defaulting to [`TemplateType::Generic`].
    pub fn classify(&self, text: &str) -> TemplateType {
        match TEMPLATE_RULES.iter().find(|rule| (rule.matches)(text)) {
            Some(rule) => {
                debug!("Template {} via rule {}", rule.template, rule.name);
                rule.template
            }
            None => {
                debug!("No template signature matched, using generic");
                TemplateType::Generic
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> TemplateType {
        TemplateClassifier::new().classify(text)
    }

    #[test]
    fn test_electronic_markers() {
        assert_eq!(
            classify("... DOKUMENT JE ELEKTRONSKO PODPISAN ..."),
            TemplateType::ElectronicForm
        );
        assert_eq!(
            classify("Dokument je elektronsko podpisan"),
            TemplateType::ElectronicForm
        );
        assert_eq!(
            classify("Oznaka dokumenta: 3301-2024-15"),
            TemplateType::ElectronicForm
        );
    }

    #[test]
    fn test_electronic_wins_over_skzg_and_density() {
        let text = "Sklad kmetijskih zemljišč\n1/1 1/2 1/3 1/4 1/5 1/6\nDOKUMENT JE ELEKTRONSKO PODPISAN";
        assert_eq!(classify(text), TemplateType::ElectronicForm);
    }

    #[test]
    fn test_skzg_signatures() {
        assert_eq!(classify("Sklad kmetijskih zemljišč RS"), TemplateType::Skzg);
        assert_eq!(classify("SKLAD KMETIJSKIH ZEMLJISC"), TemplateType::Skzg);
        assert_eq!(classify("Oddajamo PONUDBO št. 12"), TemplateType::Skzg);
        assert_eq!(classify("ponudbo st. 4"), TemplateType::Skzg);

        let dense = "Sklad kmetijskih zemljišč 1/1 1/2 1/3 1/4 1/5 1/6";
        assert_eq!(classify(dense), TemplateType::Skzg);
    }

    #[test]
    fn test_table_density() {
        let text = "12/1 | 300\n12/2 | 400\n12/3 | 500\n12/4 | 600\n12/5 | 700\n12/6 | 800";
        assert_eq!(classify(text), TemplateType::TableFormat);

        let four = "12/1 12/2 12/3 12/4";
        assert_eq!(classify(four), TemplateType::Generic);

        let five_repeated = "7/1 7/1 7/1 7/1 7/1";
        assert_eq!(classify(five_repeated), TemplateType::TableFormat);
    }

    #[test]
    fn test_generic_default() {
        assert_eq!(classify(""), TemplateType::Generic);
        assert_eq!(classify("Objava prodaje kmetijskega zemljišča"), TemplateType::Generic);
    }

    #[test]
    fn test_offer_word_in_prose_is_not_skzg() {
        let text = "Upravna enota je prejela ponudbo stranke za parcelo 845/2.";
        assert_eq!(classify(text), TemplateType::Generic);
        assert_eq!(classify("ponudbo stevilka 7"), TemplateType::Generic);
    }

    #[test]
    fn test_deterministic() {
        let text = "Parcelna številka: 100/2\nOznaka dokumenta 22-3";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_every_rule_reachable() {
        let samples = [
            "DOKUMENT JE ELEKTRONSKO PODPISAN",
            "Oznaka dokumenta 1-2",
            "Sklad kmetijskih zemljisc",
            "PONUDBO st",
            "1/1 1/2 1/3 1/4 1/5",
        ];
        for (rule, sample) in TEMPLATE_RULES.iter().zip(samples) {
            assert!((rule.matches)(sample), "rule {} should match {:?}", rule.name, sample);
        }
    }
}
