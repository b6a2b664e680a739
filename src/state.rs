use std::path::Path;
use std::sync::Arc;

use crate::data::cache::DatasetCache;
use crate::data::filter::FilteredView;
use crate::data::model::Dataset;
use crate::export::{ExportFile, export_customer_ids};
use crate::render::{MetricTab, RenderOutput, Selection, render, resolve_segment};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Export progress shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    /// "Export Customer IDs" was clicked; "Download CSV" is offered.
    Ready(ExportFile),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Read-through cache of the segmentation table.
    pub cache: DatasetCache,

    /// Segment and tab chosen by the user.
    pub selection: Selection,

    pub export: ExportState,

    /// Load failure; once set the dashboard only shows this.
    pub fatal_error: Option<String>,

    /// Status / error message shown in the sidebar.
    pub status_message: Option<String>,

    /// Output of the last render and the selection it was made for.
    rendered: Option<(Selection, Arc<RenderOutput>)>,
}

impl AppState {
    pub fn new(cache: DatasetCache) -> Self {
        Self {
            cache,
            selection: Selection::default(),
            export: ExportState::Idle,
            fatal_error: None,
            status_message: None,
            rendered: None,
        }
    }

    /// The loaded dataset, or `None` after a fatal load error. Never retries.
    pub fn dataset(&mut self) -> Option<Arc<Dataset>> {
        if self.fatal_error.is_some() {
            return None;
        }
        match self.cache.get_or_load() {
            Ok(ds) => Some(ds),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.cache.path().display());
                self.fatal_error = Some(format!("{e:#}"));
                None
            }
        }
    }

    /// Render output for the current selection, recomputed when it changed.
    pub fn frame(&mut self) -> Option<Arc<RenderOutput>> {
        let dataset = self.dataset()?;
        if let Some((selection, output)) = &self.rendered {
            if *selection == self.selection {
                return Some(Arc::clone(output));
            }
        }
        let output = Arc::new(render(&dataset, &self.selection));
        self.rendered = Some((self.selection.clone(), Arc::clone(&output)));
        Some(output)
    }

    /// Choose a segment. A pending export belongs to the old segment and is dropped.
    pub fn select_segment(&mut self, segment: &str) {
        if self.selection.segment.as_deref() == Some(segment) {
            return;
        }
        log::debug!("Segment selected: {segment}");
        self.selection.segment = Some(segment.to_string());
        self.export = ExportState::Idle;
        self.status_message = None;
    }

    pub fn select_tab(&mut self, tab: MetricTab) {
        self.selection.tab = tab;
    }

    /// Build the CustomerID export for the selected segment.
    pub fn prepare_export(&mut self) {
        let Some(dataset) = self.dataset() else {
            return;
        };
        let Some(segment) = resolve_segment(&dataset, &self.selection) else {
            self.status_message = Some("No segment to export".to_string());
            return;
        };

        let view = FilteredView::new(&dataset, segment);
        match export_customer_ids(&view) {
            Ok(file) => {
                log::info!("Prepared {} ({} customers)", file.file_name, view.len());
                self.export = ExportState::Ready(file);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the prepared export to `path`.
    pub fn save_export(&mut self, path: &Path) {
        let ExportState::Ready(file) = &self.export else {
            return;
        };
        self.status_message = Some(match file.save(path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("Saving export failed: {e}");
                format!("Error: {e}")
            }
        });
    }
}
