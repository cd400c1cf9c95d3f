use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// Hues start at `base`'s hue so the first pie slice matches the chart colour.
pub fn generate_palette(n: usize, base: Color32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let base: Hsl = Srgb::new(base.r(), base.g(), base.b())
        .into_format::<f32>()
        .into_color();
    let start = base.hue.into_positive_degrees();
    (0..n)
        .map(|i| {
            let hue = start + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb.into_format())
        })
        .collect()
}

pub fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let colors = generate_palette(5, Color32::from_rgb(0xFF, 0x57, 0x33));
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn empty_palette() {
        assert!(generate_palette(0, Color32::RED).is_empty());
    }

    #[test]
    fn converts_srgb_bytes() {
        assert_eq!(to_color32(Srgb::new(1, 2, 3)), Color32::from_rgb(1, 2, 3));
    }
}
