use super::model::{CustomerRecord, Dataset};

// ---------------------------------------------------------------------------
// Segment filter
// ---------------------------------------------------------------------------

/// Return indices of customers whose segment equals `segment`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, segment: &str) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.segment == segment)
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the customers of one segment
// ---------------------------------------------------------------------------

/// Borrowed subset of a [`Dataset`]. Rebuilt on every render, never stored.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub segment: &'a str,
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, segment: &'a str) -> Self {
        Self {
            segment,
            dataset,
            indices: filtered_indices(dataset, segment),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a CustomerRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn recency_values(&self) -> Vec<f64> {
        self.records().map(|r| f64::from(r.recency)).collect()
    }

    pub fn frequency_values(&self) -> Vec<f64> {
        self.records().map(|r| f64::from(r.frequency)).collect()
    }

    pub fn monetary_values(&self) -> Vec<f64> {
        self.records().map(|r| r.monetary).collect()
    }

    pub fn customer_ids(&self) -> Vec<&'a str> {
        self.records().map(|r| r.customer_id.as_str()).collect()
    }
}
