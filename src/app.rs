use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RfmDashboardApp {
    pub state: AppState,
    sidebar_width: f32,
}

impl RfmDashboardApp {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            state: AppState::new(DatasetCache::new(config.data_path.clone())),
            sidebar_width: config.sidebar_width,
        }
    }
}

impl eframe::App for RfmDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some(output) = self.state.frame() else {
            let message = self.state.fatal_error.clone().unwrap_or_default();
            let path = self.state.cache.path().to_path_buf();
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::load_error(ui, &path, &message);
            });
            return;
        };

        // ---- Left side panel: segment filter + export ----
        egui::SidePanel::left("filter_panel")
            .default_width(self.sidebar_width)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &output);
            });

        // ---- Central panel: metrics and plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::summary(ui, &output);
                    ui.add_space(12.0);
                    plot::distribution_tabs(ui, &mut self.state, &output.distribution, &output.tabs);
                    ui.add_space(12.0);
                    plot::comparison_plot(ui, &output.comparison);
                });
        });
    }
}
