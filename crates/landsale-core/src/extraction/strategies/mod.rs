//! Per-template field extraction strategies.
//!
//! Each strategy owns one layout family and produces the plot list for it.
//! Plot confidences are fixed per strategy; they reflect how much the layout
//! can be trusted, not how strong an individual match was.

mod electronic;
mod generic;
mod skzg;
mod table;

pub use electronic::ElectronicFormStrategy;
pub use generic::GenericStrategy;
pub use skzg::SkzgStrategy;
pub use table::TableFormatStrategy;

use crate::models::document::{PlotRecord, TemplateType};

/// What a strategy recovered from a notice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutput {
    /// Plots in discovery order.
    pub plots: Vec<PlotRecord>,
    /// Total area, for layouts that state per-plot areas reliably.
    pub total_area_m2: Option<u64>,
    /// Diagnostics for the result notes.
    pub notes: Vec<String>,
}

impl StrategyOutput {
    pub fn from_plots(plots: Vec<PlotRecord>) -> Self {
        Self {
            plots,
            ..Self::default()
        }
    }
}

/// Trait for template-specific extraction.
pub trait ExtractionStrategy: Send + Sync {
    /// Template this strategy handles.
    fn template(&self) -> TemplateType;

    /// Confidence attached to every plot this strategy produces.
    fn plot_confidence(&self) -> f32;

    /// Extract plots from the full notice text.
    fn extract(&self, text: &str) -> StrategyOutput;
}

/// Byte offset `chars` characters after `from`, clamped to the text end.
pub(crate) fn window_end(text: &str, from: usize, chars: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(chars)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}
