//! Electronically signed web forms.
//!
//! The form prints labelled fields, but usually grouped by field type: all
//! "Parcelna številka" labels first, then all prices, then all areas, then
//! all shares. Such fields can only be paired with parcels by list index.
//! When the form instead repeats a block per parcel, each field is attached
//! to the parcel label block it appears in, so a price missing in the middle
//! leaves a gap instead of shifting later prices onto the wrong parcel.

use regex::Regex;
use tracing::debug;

use crate::extraction::rules::patterns::{EFORM_AREA, EFORM_PARCEL, EFORM_PRICE, EFORM_SHARE};
use crate::extraction::rules::{parse_area, parse_price_literal};
use crate::models::document::{PlotRecord, TemplateType};

use super::{ExtractionStrategy, StrategyOutput};

/// How a field list was paired with the parcel labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pairing {
    /// Each value sits inside the label block of its parcel.
    Anchored,
    /// i-th value goes to the i-th parcel.
    Positional,
}

/// A labelled value and the byte offset of its label.
#[derive(Debug, Clone)]
struct Labelled<T> {
    start: usize,
    value: T,
}

fn scan<T>(pattern: &Regex, text: &str, parse: impl Fn(&str) -> T) -> Vec<Labelled<T>> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let value = caps.get(1)?;
            Some(Labelled {
                start: full.start(),
                value: parse(value.as_str()),
            })
        })
        .collect()
}

/// Electronic form strategy.
#[derive(Debug, Clone, Copy)]
pub struct ElectronicFormStrategy {
    /// Attach fields to their parcel block when the layout allows it.
    anchor_fields: bool,
    /// Report index-aligned fields in the notes.
    note_aligned: bool,
}

impl ElectronicFormStrategy {
    pub const CONFIDENCE: f32 = 0.9;

    pub fn new() -> Self {
        Self {
            anchor_fields: true,
            note_aligned: true,
        }
    }

    /// Set block anchoring. Off means strict index alignment.
    pub fn with_anchoring(mut self, anchor: bool) -> Self {
        self.anchor_fields = anchor;
        self
    }

    /// Set alignment notes.
    pub fn with_alignment_notes(mut self, note: bool) -> Self {
        self.note_aligned = note;
        self
    }

    /// Whether `fields` are printed inside the parcel label blocks.
    ///
    /// Decided per field kind: grouped layouts print every value of a kind
    /// after the last parcel label, whatever other kinds do.
    fn interleaved<T>(&self, fields: &[Labelled<T>], anchors: &[usize]) -> bool {
        self.anchor_fields
            && anchors.len() > 1
            && anchors
                .last()
                .is_some_and(|&last| fields.iter().any(|f| f.start < last))
    }

    /// Pair `fields` with the parcel labels starting at `anchors`.
    fn pair<T: Clone>(&self, fields: &[Labelled<T>], anchors: &[usize]) -> (Vec<Option<T>>, Pairing) {
        if self.interleaved(fields, anchors) {
            if let Some(slots) = Self::anchor(fields, anchors) {
                return (slots, Pairing::Anchored);
            }
        }

        let slots = (0..anchors.len())
            .map(|i| fields.get(i).map(|f| f.value.clone()))
            .collect();
        (slots, Pairing::Positional)
    }

    /// Block assignment; `None` when a value precedes every label or two
    /// values of the same kind share a block.
    fn anchor<T: Clone>(fields: &[Labelled<T>], anchors: &[usize]) -> Option<Vec<Option<T>>> {
        let mut slots: Vec<Option<T>> = vec![None; anchors.len()];
        for field in fields {
            let block = anchors.partition_point(|&a| a <= field.start).checked_sub(1)?;
            if slots[block].is_some() {
                return None;
            }
            slots[block] = Some(field.value.clone());
        }
        Some(slots)
    }

    fn alignment_note<T>(
        &self,
        kind: &str,
        pairing: Pairing,
        fields: &[Labelled<T>],
        parcel_ids: &[String],
    ) -> Option<String> {
        if !self.note_aligned
            || pairing != Pairing::Positional
            || parcel_ids.len() < 2
            || fields.is_empty()
        {
            return None;
        }
        let filled: Vec<&str> = parcel_ids
            .iter()
            .take(fields.len())
            .map(String::as_str)
            .collect();
        Some(format!(
            "{kind}: {} values for {} parcels aligned by position ({})",
            fields.len(),
            parcel_ids.len(),
            filled.join(", ")
        ))
    }
}

impl Default for ElectronicFormStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for ElectronicFormStrategy {
    fn template(&self) -> TemplateType {
        TemplateType::ElectronicForm
    }

    fn plot_confidence(&self) -> f32 {
        Self::CONFIDENCE
    }

    fn extract(&self, text: &str) -> StrategyOutput {
        let parcels = scan(&EFORM_PARCEL, text, str::to_string);
        let prices = scan(&EFORM_PRICE, text, parse_price_literal);
        let areas = scan(&EFORM_AREA, text, parse_area);
        let shares = scan(&EFORM_SHARE, text, str::to_string);

        let anchors: Vec<usize> = parcels.iter().map(|p| p.start).collect();
        let parcel_ids: Vec<String> = parcels.into_iter().map(|p| p.value).collect();

        let (price_slots, price_pairing) = self.pair(&prices, &anchors);
        let (area_slots, area_pairing) = self.pair(&areas, &anchors);
        let (share_slots, share_pairing) = self.pair(&shares, &anchors);

        debug!(
            "Electronic form: {} parcels, {} prices ({:?}), {} areas ({:?}), {} shares ({:?})",
            parcel_ids.len(),
            prices.len(),
            price_pairing,
            areas.len(),
            area_pairing,
            shares.len(),
            share_pairing
        );

        let notes: Vec<String> = [
            self.alignment_note("price", price_pairing, &prices, &parcel_ids),
            self.alignment_note("area", area_pairing, &areas, &parcel_ids),
            self.alignment_note("share", share_pairing, &shares, &parcel_ids),
        ]
        .into_iter()
        .flatten()
        .collect();

        let plots: Vec<PlotRecord> = parcel_ids
            .iter()
            .zip(price_slots)
            .zip(area_slots)
            .zip(share_slots)
            .map(|(((id, price), area), share)| {
                PlotRecord::new(id.clone(), Self::CONFIDENCE)
                    .with_price(price.flatten())
                    .with_area(area.flatten())
                    .with_share(share)
            })
            .collect();

        let total_area: u64 = plots.iter().filter_map(|p| p.area_m2).map(u64::from).sum();

        StrategyOutput {
            plots,
            total_area_m2: (total_area > 0).then_some(total_area),
            notes,
        }
    }
}
