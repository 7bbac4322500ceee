//! Keyed store of extraction results used for incremental processing.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::DocumentResult;
use crate::error::Result;

/// Database bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    /// When the database file was first written.
    pub created_at: DateTime<Utc>,

    /// When the database was last saved.
    pub last_updated: DateTime<Utc>,

    /// Number of stored extractions.
    pub total_extractions: usize,
}

/// Extraction results keyed by document id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionDatabase {
    pub metadata: DatabaseMetadata,
    pub extractions: BTreeMap<String, DocumentResult>,
}

impl ExtractionDatabase {
    /// Create an empty database stamped with `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            metadata: DatabaseMetadata {
                created_at: now,
                last_updated: now,
                total_extractions: 0,
            },
            extractions: BTreeMap::new(),
        }
    }

    /// Load the database at `path`, or start an empty one if it does not exist.
    pub fn open(path: &Path, now: DateTime<Utc>) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(now));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whether a result for `document_id` is already stored.
    pub fn contains(&self, document_id: &str) -> bool {
        self.extractions.contains_key(document_id)
    }

    /// Store a result, replacing any previous one for the same document.
    pub fn insert(&mut self, result: DocumentResult) -> Option<DocumentResult> {
        let previous = self.extractions.insert(result.document_id.clone(), result);
        self.metadata.total_extractions = self.extractions.len();
        previous
    }

    /// Write the database to `path`, stamping `last_updated`.
    pub fn save(&mut self, path: &Path, now: DateTime<Utc>) -> Result<()> {
        self.metadata.last_updated = now;
        self.metadata.total_extractions = self.extractions.len();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.extractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractions.is_empty()
    }
}
