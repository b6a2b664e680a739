use std::path::PathBuf;

/// Where the upstream segmentation job leaves its output.
pub const DEFAULT_DATA_PATH: &str = "rfm_clusters.csv";

/// Window and data settings, compiled in.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub sidebar_width: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_title: "RFM Dashboard".to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            sidebar_width: 220.0,
        }
    }
}
