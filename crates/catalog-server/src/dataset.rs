//! Dataset loading.
//!
//! The dataset is a JSON array of pages, each page an array of entries. It is
//! re-read on every query so edits to the file show up without a restart.
//! Entries are kept as the JSON values found in the file, so a served page is
//! byte-for-byte the same records the file holds.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One pre-partitioned page, entries untouched
pub type RawPage = Vec<Value>;

/// The full catalog as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Dataset {
    pages: Vec<RawPage>,
}

impl Dataset {
    pub fn new(pages: Vec<RawPage>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page at a zero-based index
    pub fn page(&self, index: usize) -> Option<&RawPage> {
        self.pages.get(index)
    }

    /// All entries across pages, in page order
    pub fn entries(&self) -> impl Iterator<Item = &Value> {
        self.pages.iter().flatten()
    }

    pub fn into_pages(self) -> Vec<RawPage> {
        self.pages
    }
}

/// Reads the dataset file on demand
#[derive(Debug, Clone)]
pub struct DatasetSource {
    path: PathBuf,
}

impl DatasetSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole dataset
    pub async fn load(&self) -> Result<Dataset, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Read {
                path: self.path.clone(),
                source,
            })?;

        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            pages = dataset.page_count(),
            "Dataset loaded"
        );

        Ok(dataset)
    }
}
