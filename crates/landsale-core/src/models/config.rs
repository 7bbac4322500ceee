//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Main configuration for the landsale pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandsaleConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Attach electronic-form prices, areas and shares to the parcel label
    /// block they appear in. When off, fields are paired by list index only.
    pub anchor_electronic_fields: bool,

    /// Record in the result notes which plots were filled by index alignment.
    pub note_aligned_fields: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            anchor_electronic_fields: true,
            note_aligned_fields: true,
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Extension of OCR text files picked up from a directory.
    pub input_extension: String,

    /// Number of parallel workers.
    pub jobs: usize,

    /// Score at or above which a document counts as high confidence.
    pub high_confidence_threshold: f32,

    /// Indent JSON output.
    pub pretty_json: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_extension: "txt".to_string(),
            jobs: 4,
            high_confidence_threshold: 0.7,
            pretty_json: true,
        }
    }
}

impl LandsaleConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch.jobs == 0 {
            return Err(crate::LandsaleError::Config(
                "batch.jobs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.batch.high_confidence_threshold) {
            return Err(crate::LandsaleError::Config(format!(
                "batch.high_confidence_threshold must be within 0..=1, got {}",
                self.batch.high_confidence_threshold
            )));
        }
        Ok(())
    }
}
