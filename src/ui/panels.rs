use eframe::egui::{self, Color32, RichText, Ui};

use crate::render::{MetricCard, RenderOutput};
use crate::state::{AppState, ExportState};

// ---------------------------------------------------------------------------
// Left side panel – segment filter and export
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, output: &RenderOutput) {
    ui.heading("Filters");
    ui.separator();

    let current = output.selected_segment.clone().unwrap_or_default();
    ui.strong("Customer Segment");
    egui::ComboBox::from_id_salt("customer_segment")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for segment in &output.segment_options {
                let is_current = current == *segment;
                if ui.selectable_label(is_current, segment).clicked() && !is_current {
                    state.select_segment(segment);
                }
            }
        });

    ui.add_space(12.0);
    ui.heading("Data Export");
    ui.separator();

    if ui.button("Export Customer IDs").clicked() {
        state.prepare_export();
    }

    if let ExportState::Ready(file) = &state.export {
        let file_name = file.file_name.clone();
        ui.label(
            RichText::new(format!("{file_name} ({})", file.mime))
                .color(ui.visuals().weak_text_color()),
        );
        if ui.button("Download CSV").clicked() {
            save_file_dialog(state, &file_name);
        }
    }

    if let Some(msg) = &state.status_message {
        let color = if msg.starts_with("Error") {
            Color32::RED
        } else {
            ui.visuals().weak_text_color()
        };
        ui.label(RichText::new(msg).color(color));
    }
}

// ---------------------------------------------------------------------------
// Header and metric cards
// ---------------------------------------------------------------------------

/// Title, subtitle, segment header and the three median cards.
pub fn summary(ui: &mut Ui, output: &RenderOutput) {
    ui.heading(RichText::new(output.title).size(26.0).strong());
    ui.label(output.subtitle);
    ui.add_space(8.0);

    ui.heading(&output.header);
    ui.label(
        RichText::new(format!("{} customers", output.customer_count))
            .color(ui.visuals().weak_text_color()),
    );
    ui.add_space(4.0);

    ui.columns(output.metrics.len(), |cols: &mut [Ui]| {
        for (col, card) in cols.iter_mut().zip(&output.metrics) {
            metric_card(col, card);
        }
    });
}

fn metric_card(ui: &mut Ui, card: &MetricCard) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().faint_bg_color)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(card.label).on_hover_text(card.help);
            ui.label(RichText::new(&card.value).size(28.0).strong());
        });
}

// ---------------------------------------------------------------------------
// Fatal load error
// ---------------------------------------------------------------------------

pub fn load_error(ui: &mut Ui, path: &std::path::Path, message: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new("Failed to load customer segments").color(Color32::RED));
        ui.label(format!("Source: {}", path.display()));
        ui.add_space(8.0);
        ui.label(RichText::new(message).monospace());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState, file_name: &str) {
    let file = rfd::FileDialog::new()
        .set_title("Save customer IDs")
        .set_file_name(file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_export(&path);
    }
}
