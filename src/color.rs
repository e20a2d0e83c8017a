use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

pub const LIGHT_BLUE: Color32 = Color32::from_rgb(173, 216, 230);
pub const LIGHT_CORAL: Color32 = Color32::from_rgb(240, 128, 128);
pub const EDGE_GRAY: Color32 = Color32::from_rgb(128, 128, 128);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// Colours for the slices of a pie: light blue and light coral first, then
/// generated hues for anything beyond two slices.
pub fn pie_colors(n: usize) -> Vec<Color32> {
    let mut colors = vec![LIGHT_BLUE, LIGHT_CORAL];
    if n > colors.len() {
        colors.extend(generate_palette(n - colors.len()));
    }
    colors.truncate(n);
    colors
}

// ---------------------------------------------------------------------------
// Named colour ramps for ranked bar charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRamp {
    /// Dark blue → pale blue.
    BluesReversed,
    /// Blue → pale grey → red.
    CoolWarm,
    /// Near-black purple → pale yellow.
    Magma,
}

impl ColorRamp {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorRamp::BluesReversed => &[(8, 48, 107), (33, 113, 181), (107, 174, 214), (222, 235, 247)],
            ColorRamp::CoolWarm => &[(59, 76, 192), (221, 221, 221), (180, 4, 38)],
            ColorRamp::Magma => &[
                (0, 0, 4),
                (81, 18, 124),
                (183, 55, 121),
                (252, 137, 97),
                (252, 253, 191),
            ],
        }
    }

    /// Colour at `t` in [0, 1], interpolated in linear RGB.
    pub fn at(self, t: f32) -> Color32 {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
        let lower = (t.floor() as usize).min(stops.len() - 2);
        let frac = t - lower as f32;

        let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
            Srgb::new(r, g, b).into_format::<f32>().into_linear()
        };
        let mixed = linear(stops[lower]).mix(linear(stops[lower + 1]), frac);
        to_color32(Srgb::from_linear(mixed))
    }

    /// `n` colours spread evenly from one end of the ramp to the other.
    pub fn sample(self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n).map(|i| self.at(i as f32 / (n - 1) as f32)).collect(),
        }
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}
