//! Extraction result models for land-sale notices.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share written on a notice when the whole parcel is sold.
pub const WHOLE_SHARE: &str = "1/1";

/// Layout family a notice was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// Electronically signed web form with labelled fields.
    ElectronicForm,
    /// Many parcels laid out as table rows.
    TableFormat,
    /// Fixed-format offer of the agricultural land fund (SKZG).
    Skzg,
    /// Anything else.
    Generic,
}

impl TemplateType {
    /// All labels, in classification priority order.
    pub const ALL: [TemplateType; 4] = [
        TemplateType::ElectronicForm,
        TemplateType::Skzg,
        TemplateType::TableFormat,
        TemplateType::Generic,
    ];

    /// Serialized label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElectronicForm => "electronic_form",
            Self::TableFormat => "table_format",
            Self::Skzg => "skzg",
            Self::Generic => "generic",
        }
    }
}

impl Default for TemplateType {
    fn default() -> Self {
        Self::Generic
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts extracted for a single cadastral parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    /// Parcel number (`<block>/<sub-number>`).
    pub parcel_id: String,

    /// Parcel area in square metres.
    pub area_m2: Option<u32>,

    /// Parcel price in EUR.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_eur: Option<Decimal>,

    /// Ownership share offered for sale.
    #[serde(default = "default_share")]
    pub share: String,

    /// Strategy confidence (0.0 - 1.0).
    pub confidence: f32,
}

fn default_share() -> String {
    WHOLE_SHARE.to_string()
}

impl PlotRecord {
    /// Create a plot with only its parcel number known.
    pub fn new(parcel_id: impl Into<String>, confidence: f32) -> Self {
        Self {
            parcel_id: parcel_id.into(),
            area_m2: None,
            price_eur: None,
            share: default_share(),
            confidence,
        }
    }

    pub fn with_area(mut self, area_m2: Option<u32>) -> Self {
        self.area_m2 = area_m2;
        self
    }

    pub fn with_price(mut self, price_eur: Option<Decimal>) -> Self {
        self.price_eur = price_eur;
        self
    }

    pub fn with_share(mut self, share: Option<String>) -> Self {
        self.share = share.unwrap_or_else(default_share);
        self
    }
}

/// Full extraction result for one notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Caller-supplied document identifier.
    pub document_id: String,

    /// Parcels in discovery order.
    pub plots: Vec<PlotRecord>,

    /// Total price stated on the notice.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_price: Option<Decimal>,

    /// Total area in square metres.
    pub total_area_m2: Option<u64>,

    /// Whether the notice states that a buyer is already known.
    #[serde(default)]
    pub buyer_known: bool,

    /// Confidence of the buyer-known decision.
    pub buyer_known_confidence: f32,

    /// Recognised layout family.
    pub template_type: TemplateType,

    /// Document-level confidence score.
    pub confidence_score: f32,

    /// Diagnostics collected during extraction.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl DocumentResult {
    /// Whether any plot carries an area.
    pub fn has_plot_areas(&self) -> bool {
        self.plots.iter().any(|p| p.area_m2.is_some())
    }

    /// Number of plots carrying an area.
    pub fn plots_with_area(&self) -> usize {
        self.plots.iter().filter(|p| p.area_m2.is_some()).count()
    }
}
