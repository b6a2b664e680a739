use serde::{Deserialize, Deserializer, de};

// ---------------------------------------------------------------------------
// CustomerRecord – one row of the segmentation table
// ---------------------------------------------------------------------------

/// A single customer with its RFM metrics and the segment assigned upstream.
///
/// Columns other than the five below are ignored when loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerRecord {
    /// Opaque identifier, kept exactly as written in the source file.
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    /// Days since last purchase.
    #[serde(rename = "Recency", deserialize_with = "whole_count")]
    pub recency: u32,
    /// Number of purchases.
    #[serde(rename = "Frequency", deserialize_with = "whole_count")]
    pub frequency: u32,
    /// Total spend.
    #[serde(rename = "Monetary")]
    pub monetary: f64,
    /// Cluster label assigned by the segmentation job.
    #[serde(rename = "Segment")]
    pub segment: String,
}

/// Accept `325` as well as `325.0`; dataframe writers often emit integer
/// columns as floats. Fractions and negatives are rejected.
fn whole_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(de::Error::custom(format!(
            "expected a non-negative whole number, got {value}"
        )));
    }
    Ok(value as u32)
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full segmentation table, immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CustomerRecord>,
    /// Distinct segment labels in the order they first appear.
    segments: Vec<String>,
}

impl Dataset {
    /// Build the segment index from the loaded records.
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        let mut segments: Vec<String> = Vec::new();
        for rec in &records {
            if !segments.iter().any(|s| *s == rec.segment) {
                segments.push(rec.segment.clone());
            }
        }
        Dataset { records, segments }
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    /// Segment labels for the selector, first-seen order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The segment selected when nothing else has been chosen.
    pub fn default_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
