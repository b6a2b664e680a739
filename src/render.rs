//! Pure render step: dataset + selection → everything the UI paints.
//!
//! The egui layer calls [`render`] on every frame and only draws what comes
//! back, so all dashboard semantics are testable without a window.

use std::fmt;

use eframe::egui::Color32;

use crate::color::{ColorMap, FREQUENCY_COLOR, MONETARY_COLOR, POINT_ALPHA, RECENCY_COLOR};
use crate::data::filter::FilteredView;
use crate::data::model::Dataset;
use crate::format::{format_currency, format_days, format_orders};
use crate::stats::{BIN_COUNT, Histogram, KDE_GRID_POINTS, SegmentSummary, kde_curve};

pub const TITLE: &str = "Customer Segmentation Dashboard";
pub const SUBTITLE: &str =
    "Analyzing customer behavior with RFM (Recency, Frequency, Monetary) metrics";
pub const COMPARISON_TITLE: &str = "Customer Segments in RFM Space";

/// Marker area range in pt², mapped from Recency.
pub const MARKER_AREA_RANGE: (f64, f64) = (20.0, 200.0);

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The three distribution tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricTab {
    #[default]
    Recency,
    Frequency,
    Monetary,
}

impl MetricTab {
    pub const ALL: [MetricTab; 3] = [
        MetricTab::Recency,
        MetricTab::Frequency,
        MetricTab::Monetary,
    ];

    pub fn color(self) -> Color32 {
        match self {
            MetricTab::Recency => RECENCY_COLOR,
            MetricTab::Frequency => FREQUENCY_COLOR,
            MetricTab::Monetary => MONETARY_COLOR,
        }
    }

    fn values(self, view: &FilteredView<'_>) -> Vec<f64> {
        match self {
            MetricTab::Recency => view.recency_values(),
            MetricTab::Frequency => view.frequency_values(),
            MetricTab::Monetary => view.monetary_values(),
        }
    }
}

impl fmt::Display for MetricTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricTab::Recency => write!(f, "Recency"),
            MetricTab::Frequency => write!(f, "Frequency"),
            MetricTab::Monetary => write!(f, "Monetary"),
        }
    }
}

/// User-controlled inputs to a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Chosen segment; `None` or an unknown label means the first segment.
    pub segment: Option<String>,
    pub tab: MetricTab,
}

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub help: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionPanel {
    pub metric: MetricTab,
    pub title: String,
    pub color: Color32,
    /// `None` when the segment has no finite values.
    pub histogram: Option<Histogram>,
    pub kde: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub segment: String,
    /// log10(Frequency).
    pub x: f64,
    /// log10(Monetary).
    pub y: f64,
    /// Marker area in pt².
    pub area: f64,
    pub color: Color32,
}

impl ScatterPoint {
    /// Marker radius in screen points for a disc of the given area.
    pub fn radius(&self) -> f32 {
        (self.area.sqrt() / 2.0) as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPlot {
    pub title: &'static str,
    pub points: Vec<ScatterPoint>,
    /// Segment legend in first-seen order.
    pub legend: Vec<(String, Color32)>,
    /// Customers with Frequency or Monetary ≤ 0, which a log axis cannot show.
    pub omitted: usize,
}

/// Everything one frame of the dashboard displays.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub segment_options: Vec<String>,
    /// `None` only when the dataset is empty.
    pub selected_segment: Option<String>,
    pub header: String,
    pub customer_count: usize,
    pub metrics: [MetricCard; 3],
    pub tabs: [MetricTab; 3],
    pub distribution: DistributionPanel,
    pub comparison: ComparisonPlot,
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

/// Resolve the selection against the dataset's segments.
pub fn resolve_segment<'a>(dataset: &'a Dataset, selection: &Selection) -> Option<&'a str> {
    selection
        .segment
        .as_deref()
        .and_then(|s| dataset.segments().iter().find(|seg| *seg == s))
        .map(String::as_str)
        .or_else(|| dataset.default_segment())
}

/// Build the full dashboard for one frame.
pub fn render(dataset: &Dataset, selection: &Selection) -> RenderOutput {
    let segment = resolve_segment(dataset, selection);
    let view = FilteredView::new(dataset, segment.unwrap_or_default());
    if view.is_empty() {
        log::warn!("Segment {:?} has no customers; medians are undefined", view.segment);
    }
    let summary = SegmentSummary::from_view(&view);

    RenderOutput {
        title: TITLE,
        subtitle: SUBTITLE,
        segment_options: dataset.segments().to_vec(),
        selected_segment: segment.map(str::to_string),
        header: format!("Segment: {}", segment.unwrap_or_default()),
        customer_count: view.len(),
        metrics: metric_cards(&summary),
        tabs: MetricTab::ALL,
        distribution: distribution_panel(&view, selection.tab),
        comparison: comparison_plot(dataset),
    }
}

fn metric_cards(summary: &SegmentSummary) -> [MetricCard; 3] {
    [
        MetricCard {
            label: "Median Recency",
            value: format_days(summary.recency),
            help: "Days since last purchase (lower is better)",
        },
        MetricCard {
            label: "Median Frequency",
            value: format_orders(summary.frequency),
            help: "Number of purchases (higher is better)",
        },
        MetricCard {
            label: "Median Spending",
            value: format_currency(summary.monetary),
            help: "Total revenue from customer (higher is better)",
        },
    ]
}

/// Histogram + density for one metric of the filtered view.
pub fn distribution_panel(view: &FilteredView<'_>, metric: MetricTab) -> DistributionPanel {
    let values = metric.values(view);
    let histogram = Histogram::compute(&values, BIN_COUNT);
    let kde = histogram
        .as_ref()
        .map(|h| kde_curve(&values, h, KDE_GRID_POINTS))
        .unwrap_or_default();

    DistributionPanel {
        metric,
        title: format!("{metric} Distribution - {}", view.segment),
        color: metric.color(),
        histogram,
        kde,
    }
}

/// Scatter of every customer in log-Frequency / log-Monetary space.
pub fn comparison_plot(dataset: &Dataset) -> ComparisonPlot {
    let color_map = ColorMap::new(dataset.segments());

    let (r_min, r_max) = dataset
        .records()
        .iter()
        .map(|r| f64::from(r.recency))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let (area_min, area_max) = MARKER_AREA_RANGE;
    let area_for = |recency: f64| {
        if r_max > r_min {
            area_min + (recency - r_min) / (r_max - r_min) * (area_max - area_min)
        } else {
            (area_min + area_max) / 2.0
        }
    };

    let mut points = Vec::with_capacity(dataset.len());
    let mut omitted = 0;
    for rec in dataset.records() {
        let frequency = f64::from(rec.frequency);
        let placeable = frequency > 0.0 && rec.monetary > 0.0 && rec.monetary.is_finite();
        if !placeable {
            omitted += 1;
            continue;
        }
        points.push(ScatterPoint {
            segment: rec.segment.clone(),
            x: frequency.log10(),
            y: rec.monetary.log10(),
            area: area_for(f64::from(rec.recency)),
            color: color_map.color_for(&rec.segment).gamma_multiply(POINT_ALPHA),
        });
    }
    if omitted > 0 {
        log::debug!("{omitted} customers have non-positive Frequency or Monetary; not plotted");
    }

    ComparisonPlot {
        title: COMPARISON_TITLE,
        points,
        legend: color_map.legend_entries().to_vec(),
        omitted,
    }
}
