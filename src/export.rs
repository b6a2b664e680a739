use std::path::Path;

use thiserror::Error;

use crate::data::filter::FilteredView;

pub const CSV_MIME: &str = "text/csv";

/// Errors raised while producing or saving an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ---------------------------------------------------------------------------
// Customer ID export
// ---------------------------------------------------------------------------

/// A ready-to-save download: name, MIME type and CSV text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Write the payload to the location the user picked.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.contents.as_bytes())?;
        log::info!("Saved {} to {}", self.file_name, path.display());
        Ok(())
    }
}

/// File name offered for a segment's export.
pub fn export_file_name(segment: &str) -> String {
    format!("{segment}_customers.csv")
}

/// Serialize the view's `CustomerID` column (header included, no index).
pub fn export_customer_ids(view: &FilteredView<'_>) -> Result<ExportFile, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["CustomerID"])?;
    for id in view.customer_ids() {
        writer.write_record([id])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    Ok(ExportFile {
        file_name: export_file_name(view.segment),
        mime: CSV_MIME,
        contents: String::from_utf8(bytes)?,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::data::model::tests::{record, sample_dataset};
    use crate::data::model::Dataset;

    fn reparse(contents: &str) -> (Vec<String>, Vec<String>) {
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        let headers = reader.headers().unwrap().iter().map(String::from).collect();
        let ids = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();
        (headers, ids)
    }

    #[test]
    fn exports_single_column_in_view_order() {
        let ds = sample_dataset();
        let view = FilteredView::new(&ds, "A");
        let export = export_customer_ids(&view).unwrap();

        assert_eq!(export.file_name, "A_customers.csv");
        assert_eq!(export.mime, "text/csv");
        assert_eq!(export.contents, "CustomerID\n1\n3\n");

        let (headers, ids) = reparse(&export.contents);
        assert_eq!(headers, ["CustomerID"]);
        assert_eq!(ids, view.customer_ids());
    }

    #[test]
    fn awkward_ids_survive_round_trip() {
        let ds = Dataset::from_records(vec![
            record("12,5", 1, 1, 1.0, "At Risk"),
            record("\"quoted\"", 1, 1, 1.0, "At Risk"),
            record("naïve", 1, 1, 1.0, "At Risk"),
        ]);
        let view = FilteredView::new(&ds, "At Risk");
        let export = export_customer_ids(&view).unwrap();
        assert_eq!(export.file_name, "At Risk_customers.csv");

        let (_, ids) = reparse(&export.contents);
        assert_eq!(ids, ["12,5", "\"quoted\"", "naïve"]);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let ds = sample_dataset();
        let export = export_customer_ids(&FilteredView::new(&ds, "none")).unwrap();
        assert_eq!(export.contents, "CustomerID\n");
    }

    #[test]
    fn export_is_idempotent() {
        let ds = sample_dataset();
        let view = FilteredView::new(&ds, "B");
        assert_eq!(
            export_customer_ids(&view).unwrap(),
            export_customer_ids(&view).unwrap()
        );
    }

    #[test]
    fn save_writes_exact_payload() {
        let dir = tempdir().unwrap();
        let ds = sample_dataset();
        let export = export_customer_ids(&FilteredView::new(&ds, "A")).unwrap();
        let path = dir.path().join(&export.file_name);
        export.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), export.contents);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let ds = sample_dataset();
        let export = export_customer_ids(&FilteredView::new(&ds, "A")).unwrap();
        let err = export.save(&dir.path().join("nope").join("x.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
