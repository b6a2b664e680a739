use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use super::loader::load_csv;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Read-through dataset cache
// ---------------------------------------------------------------------------

/// Holds the dataset once it has been read so every render reuses it.
///
/// Created at startup and owned by the application state; the file is read
/// on the first call to [`DatasetCache::get_or_load`] and never again.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    dataset: Option<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dataset: None,
        }
    }

    /// A cache that is already populated.
    #[cfg(test)]
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            path: PathBuf::new(),
            dataset: Some(Arc::new(dataset)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached dataset, reading the file on first access.
    pub fn get_or_load(&mut self) -> Result<Arc<Dataset>> {
        if let Some(ds) = &self.dataset {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_csv(&self.path)?);
        self.dataset = Some(Arc::clone(&ds));
        Ok(ds)
    }
}
