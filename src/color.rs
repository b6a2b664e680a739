use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed metric colours
// ---------------------------------------------------------------------------

pub const RECENCY_COLOR: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
pub const FREQUENCY_COLOR: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
pub const MONETARY_COLOR: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);

/// Opacity of scatter markers.
pub const POINT_ALPHA: f32 = 0.7;

// ---------------------------------------------------------------------------
// Viridis palette
// ---------------------------------------------------------------------------

/// Viridis control points (sRGB), evenly spaced over [0, 1].
const VIRIDIS_STOPS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x47, 0x2c, 0x7a),
    (0x3b, 0x52, 0x8b),
    (0x2c, 0x72, 0x8e),
    (0x21, 0x91, 0x8c),
    (0x28, 0xae, 0x80),
    (0x5e, 0xc9, 0x62),
    (0xad, 0xdc, 0x30),
    (0xfd, 0xe7, 0x25),
];

/// Sample the viridis colour map at `t` in [0, 1].
pub fn viridis(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let last = VIRIDIS_STOPS.len() - 1;
    let pos = t * last as f32;
    let lo = (pos.floor() as usize).min(last - 1);
    let frac = pos - lo as f32;

    let to_linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = to_linear(VIRIDIS_STOPS[lo]).mix(to_linear(VIRIDIS_STOPS[lo + 1]), frac);
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// `n` colours from viridis, skipping both extremes like a discrete
/// colour map sampled at `linspace(0, 1, n + 2)[1..=n]`.
pub fn viridis_palette(n: usize) -> Vec<Color32> {
    (1..=n)
        .map(|i| viridis(i as f32 / (n + 1) as f32))
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: segment label → Color32
// ---------------------------------------------------------------------------

/// Maps segment labels to palette colours, in the order they are given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given labels.
    pub fn new(labels: &[String]) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(viridis_palette(labels.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.mapping
    }
}
