use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SpectralIndex;

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl: Hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours with hues spread over `span`
/// degrees starting at `start_hue`.
pub fn generate_palette(n: usize, start_hue: f32, span: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (start_hue + (i as f32 / n as f32) * span).rem_euclid(360.0);
            hsl_to_color32(hue, 0.65, 0.40)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Index colours: SpectralIndex → Color32
// ---------------------------------------------------------------------------

/// Fixed colours for plotting each index.
#[derive(Debug, Clone)]
pub struct IndexPalette {
    mapping: BTreeMap<SpectralIndex, Color32>,
    default_color: Color32,
}

impl Default for IndexPalette {
    /// Greens through blues, matching the vegetation → water → moisture order.
    fn default() -> Self {
        let colors = generate_palette(SpectralIndex::ALL.len(), 110.0, 150.0);
        IndexPalette {
            mapping: SpectralIndex::ALL.into_iter().zip(colors).collect(),
            default_color: Color32::GRAY,
        }
    }
}

impl IndexPalette {
    pub fn color_for(&self, index: SpectralIndex) -> Color32 {
        self.mapping
            .get(&index)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging ramp for correlation coefficients
// ---------------------------------------------------------------------------

/// Fill colour for a correlation coefficient in [-1, 1].
///
/// Positive values shade towards green, negative towards brown, zero is
/// near-white.  `NaN` maps to grey.
pub fn correlation_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::LIGHT_GRAY;
    }
    let r = r.clamp(-1.0, 1.0) as f32;
    let hue = if r >= 0.0 { 140.0 } else { 25.0 };
    let strength = r.abs();
    hsl_to_color32(hue, 0.15 + 0.45 * strength, 0.95 - 0.55 * strength)
}

/// Readable text colour on top of [`correlation_color`].
pub fn correlation_text_color(r: f64) -> Color32 {
    if r.abs() > 0.6 { Color32::WHITE } else { Color32::BLACK }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes() {
        assert!(generate_palette(0, 0.0, 360.0).is_empty());
        assert_eq!(generate_palette(3, 110.0, 150.0).len(), 3);
    }

    #[test]
    fn indices_get_distinct_colours() {
        let p = IndexPalette::default();
        let colors: Vec<_> = SpectralIndex::ALL.iter().map(|&i| p.color_for(i)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn correlation_ramp_darkens_with_strength() {
        let weak = correlation_color(0.1);
        let strong = correlation_color(0.95);
        let lum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(lum(strong) < lum(weak));
        assert_eq!(correlation_color(f64::NAN), Color32::LIGHT_GRAY);
        // Green dominates for positive, red for negative.
        assert!(strong.g() > strong.r());
        let neg = correlation_color(-0.95);
        assert!(neg.r() > neg.g());
    }
}
