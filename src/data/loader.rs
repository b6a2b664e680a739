use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CustomerRecord, Dataset};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the segmentation table written by the upstream clustering job.
///
/// Expected layout (header row, any column order, extra columns ignored):
///
/// ```text
/// CustomerID,Recency,Frequency,Monetary,Segment
/// 12346,325,1,77183.60,Lost
/// 12347,2,7,4310.00,Champions
/// ```
///
/// There is no partial load: the first bad row aborts with its row number.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let dataset = read_records(reader)?;

    log::info!(
        "Loaded {} customers in {} segments from {}",
        dataset.len(),
        dataset.segments().len(),
        path.display()
    );
    Ok(dataset)
}

fn read_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let mut records = Vec::new();

    // Rows are numbered from 1, like the csv crate's record numbers.
    for (row_no, result) in (1usize..).zip(reader.deserialize::<CustomerRecord>()) {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    if records.is_empty() {
        bail!("CSV contains no customer records");
    }

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_records_and_segments() {
        let file = write_csv(
            "CustomerID,Recency,Frequency,Monetary,Segment\n\
             1,10,2,100.0,A\n\
             2,5,4,500.0,B\n\
             3,15,1,50.0,A\n",
        );
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.segments(), ["A", "B"]);
        assert_eq!(ds.records()[1].customer_id, "2");
        assert_eq!(ds.records()[1].monetary, 500.0);
    }

    #[test]
    fn ignores_extra_columns_and_column_order() {
        let file = write_csv(
            "Segment,Cluster,Monetary,CustomerID,Frequency,Recency\n\
             Loyal,2,1234.5,C-17850,12,3\n",
        );
        let ds = load_csv(file.path()).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.customer_id, "C-17850");
        assert_eq!(rec.recency, 3);
        assert_eq!(rec.frequency, 12);
        assert_eq!(rec.segment, "Loyal");
    }

    #[test]
    fn customer_id_is_not_reformatted() {
        let file = write_csv(
            "CustomerID,Recency,Frequency,Monetary,Segment\n\
             12346.0,325,1,77183.6,Lost\n",
        );
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.records()[0].customer_id, "12346.0");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_csv(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_csv("CustomerID,Recency,Frequency,Monetary\n1,10,2,100.0\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn malformed_metric_reports_row() {
        let file = write_csv(
            "CustomerID,Recency,Frequency,Monetary,Segment\n\
             1,10,2,100.0,A\n\
             2,soon,4,500.0,B\n",
        );
        let err = load_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 2"));
    }

    #[test]
    fn float_formatted_counts_are_accepted() {
        let file = write_csv(
            "CustomerID,Recency,Frequency,Monetary,Segment\n\
             12346.0,325.0,1.0,77183.6,Lost\n\
             12347,2,7,4310.0,Champions\n",
        );
        let ds = load_csv(file.path()).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.recency, 325);
        assert_eq!(rec.frequency, 1);
        assert_eq!(ds.records()[1].frequency, 7);
    }

    #[test]
    fn fractional_or_negative_counts_are_rejected() {
        for row in ["1,2.5,3,10.0,A", "1,2,-3,10.0,A"] {
            let file = write_csv(&format!(
                "CustomerID,Recency,Frequency,Monetary,Segment\n{row}\n"
            ));
            let err = load_csv(file.path()).unwrap_err();
            assert!(format!("{err:#}").contains("non-negative whole number"));
        }
    }

    #[test]
    fn header_only_file_is_an_error() {
        let file = write_csv("CustomerID,Recency,Frequency,Monetary,Segment\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("no customer records"));
    }
}
