use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::render::{ComparisonPlot, DistributionPanel, MetricTab};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Distribution tabs
// ---------------------------------------------------------------------------

/// Tab strip plus the histogram of the active metric.
pub fn distribution_tabs(
    ui: &mut Ui,
    state: &mut AppState,
    panel: &DistributionPanel,
    tabs: &[MetricTab],
) {
    ui.heading("Distribution Analysis");
    ui.horizontal(|ui: &mut Ui| {
        for &tab in tabs {
            if ui.selectable_label(panel.metric == tab, tab.to_string()).clicked() {
                state.select_tab(tab);
            }
        }
    });
    ui.separator();
    distribution_plot(ui, panel);
}

fn distribution_plot(ui: &mut Ui, panel: &DistributionPanel) {
    ui.label(&panel.title);

    let Some(hist) = &panel.histogram else {
        ui.label("No customers in this segment.");
        return;
    };

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bar::new(hist.bin_center(i), count as f64).width(hist.bin_width))
        .collect();
    let chart = BarChart::new(bars)
        .color(panel.color.gamma_multiply(0.6))
        .name(panel.metric.to_string());

    Plot::new(("distribution_plot", panel.metric.to_string()))
        .height(320.0)
        .x_axis_label(panel.metric.to_string())
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if !panel.kde.is_empty() {
                let curve: PlotPoints = panel.kde.iter().copied().collect();
                plot_ui.line(Line::new(curve).color(panel.color).width(2.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Segment comparison scatter (whole dataset)
// ---------------------------------------------------------------------------

/// Axis labels for log10 coordinates: show the original value.
fn log_tick(value: f64) -> String {
    let original = 10f64.powf(value);
    if original >= 10_000.0 {
        format!("{:.0}k", original / 1000.0)
    } else if original >= 1000.0 {
        format!("{:.1}k", original / 1000.0)
    } else if original >= 1.0 {
        format!("{original:.0}")
    } else {
        format!("{original:.2}")
    }
}

pub fn comparison_plot(ui: &mut Ui, plot: &ComparisonPlot) {
    ui.heading("Segment Comparison");
    ui.label(plot.title);
    if plot.omitted > 0 {
        ui.label(format!(
            "{} customers with zero Frequency or Monetary are not shown on the log axes.",
            plot.omitted
        ));
    }

    Plot::new("segment_comparison")
        .height(420.0)
        .legend(Legend::default())
        .x_axis_label("Frequency (log scale)")
        .y_axis_label("Monetary (log scale)")
        .x_axis_formatter(|mark, _range| log_tick(mark.value))
        .y_axis_formatter(|mark, _range| log_tick(mark.value))
        .label_formatter(|name, value| {
            format!(
                "{name}\nFrequency: {}\nMonetary: {}",
                log_tick(value.x),
                log_tick(value.y)
            )
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for point in &plot.points {
                plot_ui.points(
                    Points::new(vec![[point.x, point.y]])
                        .name(&point.segment)
                        .color(point.color)
                        .radius(point.radius())
                        .filled(true),
                );
            }
            // Segments without placeable points still get a legend entry.
            for (segment, color) in &plot.legend {
                if !plot.points.iter().any(|p| p.segment == *segment) {
                    let empty: Vec<[f64; 2]> = Vec::new();
                    plot_ui.points(Points::new(empty).name(segment).color(*color));
                }
            }
        });

    if plot.points.is_empty() {
        ui.colored_label(Color32::GRAY, "No customers to plot.");
    }
}
