//! Summary statistics and distribution estimates for a segment.

use crate::data::filter::FilteredView;

/// Number of histogram bins in every distribution panel.
pub const BIN_COUNT: usize = 20;

/// Number of points the density curve is evaluated on.
pub const KDE_GRID_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Median
// ---------------------------------------------------------------------------

/// Median of the finite values, `None` when there are none.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Medians shown in the metric cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSummary {
    pub recency: Option<f64>,
    pub frequency: Option<f64>,
    pub monetary: Option<f64>,
}

impl SegmentSummary {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        Self {
            recency: median(&view.recency_values()),
            frequency: median(&view.frequency_values()),
            monetary: median(&view.monetary_values()),
        }
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram over the data range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values into `bins` buckets. `None` when nothing is finite.
    ///
    /// The last bin is closed on the right so the maximum is counted. When
    /// every value is identical the bins span a unit window around it.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if clean.is_empty() {
            return None;
        }
        let bins = bins.max(1);

        let min = clean.iter().copied().fold(f64::INFINITY, f64::min);
        let max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (start, end) = if max > min {
            (min, max)
        } else {
            (min - 0.5, min + 0.5)
        };
        let bin_width = (end - start) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &value in &clean {
            let bin = ((value - start) / bin_width).floor() as usize;
            counts[bin.min(bins - 1)] += 1;
        }

        Some(Histogram {
            start,
            bin_width,
            counts,
        })
    }

    /// Centre of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Gaussian KDE drawn over a histogram, scaled to its counts.
///
/// Bandwidth follows Scott's rule (`n^(-1/5)` times the sample standard
/// deviation). The curve covers the data range only. Returns an empty curve
/// when there are fewer than two distinct values.
pub fn kde_curve(values: &[f64], histogram: &Histogram, n_points: usize) -> Vec<[f64; 2]> {
    let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = clean.len();
    if n < 2 || n_points < 2 {
        return Vec::new();
    }

    let mean = clean.iter().sum::<f64>() / n as f64;
    let variance = clean.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Vec::new();
    }
    let h = std_dev * (n as f64).powf(-0.2);

    let min = clean.iter().copied().fold(f64::INFINITY, f64::min);
    let max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (n_points - 1) as f64;

    // Density integrates to 1; multiply by n * bin_width to match bar heights.
    let scale = n as f64 * histogram.bin_width;
    let norm = (2.0 * std::f64::consts::PI).sqrt() * h * n as f64;

    (0..n_points)
        .map(|i| {
            let x = min + i as f64 * step;
            let density: f64 = clean
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / h;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / norm;
            [x, density * scale]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::FilteredView;
    use crate::data::model::tests::sample_dataset;
    use crate::data::model::{CustomerRecord, Dataset};

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[10.0, 15.0]), Some(12.5));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn median_of_nothing_is_undefined() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[f64::NAN]), None);
    }

    #[test]
    fn median_skips_nan() {
        assert_eq!(median(&[1.0, f64::NAN, 3.0]), Some(2.0));
    }

    #[test]
    fn summary_for_segment_a() {
        let ds = sample_dataset();
        let summary = SegmentSummary::from_view(&FilteredView::new(&ds, "A"));
        assert_eq!(summary.recency, Some(12.5));
        assert_eq!(summary.frequency, Some(1.5));
        assert_eq!(summary.monetary, Some(75.0));
    }

    #[test]
    fn single_record_summary_is_that_record() {
        let ds = sample_dataset();
        let summary = SegmentSummary::from_view(&FilteredView::new(&ds, "B"));
        assert_eq!(summary.recency, Some(5.0));
        assert_eq!(summary.frequency, Some(4.0));
        assert_eq!(summary.monetary, Some(500.0));
    }

    #[test]
    fn empty_view_summary_is_undefined() {
        let ds = sample_dataset();
        let summary = SegmentSummary::from_view(&FilteredView::new(&ds, "missing"));
        assert_eq!(summary.recency, None);
        assert_eq!(summary.frequency, None);
        assert_eq!(summary.monetary, None);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let hist = Histogram::compute(&values, BIN_COUNT).unwrap();
        assert_eq!(hist.counts.len(), BIN_COUNT);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        assert_relative_eq!(hist.bin_width, 5.0);
        // Maximum lands in the closed last bin.
        assert_eq!(hist.counts[BIN_COUNT - 1], 6);
        assert_relative_eq!(hist.bin_center(0), 2.5);
    }

    #[test]
    fn histogram_of_constant_values() {
        let hist = Histogram::compute(&[7.0, 7.0, 7.0], BIN_COUNT).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
        assert_relative_eq!(hist.start, 6.5);
        assert_relative_eq!(hist.bin_width, 1.0 / BIN_COUNT as f64);
    }

    #[test]
    fn histogram_of_nothing() {
        assert!(Histogram::compute(&[], BIN_COUNT).is_none());
    }

    #[test]
    fn kde_spans_data_range_and_matches_counts() {
        let values: Vec<f64> = (0..200).map(|i| f64::from(i % 40)).collect();
        let hist = Histogram::compute(&values, BIN_COUNT).unwrap();
        let curve = kde_curve(&values, &hist, KDE_GRID_POINTS);
        assert_eq!(curve.len(), KDE_GRID_POINTS);
        assert_relative_eq!(curve[0][0], 0.0);
        assert_relative_eq!(curve[KDE_GRID_POINTS - 1][0], 39.0, epsilon = 1e-9);

        // Area under the scaled curve is close to the histogram area.
        let step = curve[1][0] - curve[0][0];
        let area: f64 = curve.iter().map(|p| p[1] * step).sum();
        let hist_area = hist.counts.iter().sum::<usize>() as f64 * hist.bin_width;
        assert!(area > 0.8 * hist_area && area < 1.05 * hist_area);
    }

    #[test]
    fn kde_needs_spread() {
        let hist = Histogram::compute(&[3.0, 3.0], BIN_COUNT).unwrap();
        assert!(kde_curve(&[3.0, 3.0], &hist, KDE_GRID_POINTS).is_empty());
        let hist = Histogram::compute(&[3.0], BIN_COUNT).unwrap();
        assert!(kde_curve(&[3.0], &hist, KDE_GRID_POINTS).is_empty());
    }

    proptest! {
        #[test]
        fn median_ignores_row_order(
            (values, shuffled) in prop::collection::vec(0.0f64..1e6, 1..80)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            prop_assert_eq!(median(&values), median(&shuffled));
        }

        #[test]
        fn summary_ignores_record_order(
            rows in prop::collection::vec((0u32..400, 1u32..60, 0.0f64..5e4), 1..40)
        ) {
            let build = |rows: &[(u32, u32, f64)]| {
                Dataset::from_records(
                    rows.iter()
                        .enumerate()
                        .map(|(i, &(recency, frequency, monetary))| CustomerRecord {
                            customer_id: i.to_string(),
                            recency,
                            frequency,
                            monetary,
                            segment: "S".to_string(),
                        })
                        .collect(),
                )
            };
            let forward = build(&rows);
            let reversed: Vec<_> = rows.iter().rev().copied().collect();
            let backward = build(&reversed);

            prop_assert_eq!(
                SegmentSummary::from_view(&FilteredView::new(&forward, "S")),
                SegmentSummary::from_view(&FilteredView::new(&backward, "S"))
            );
        }
    }
}
