use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

pub const AVAILABLE: Color32 = Color32::from_rgb(0x1f, 0x4e, 0xd8);
pub const UNAVAILABLE: Color32 = Color32::from_rgb(0xd6, 0x27, 0x28);
pub const BOX_FILL: Color32 = Color32::from_rgb(0x63, 0x6e, 0xfa);

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Colour for a value's position `t` in `[0, 1]` of the shown range,
/// running from teal (low) to violet (high).
pub fn value_gradient(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let hue = 180.0 + t as f32 * 100.0;
    hsl_to_color32(Hsl::new(hue, 0.65, 0.5))
}

/// Slice colour for an availability flag.
pub fn availability(flag: bool) -> Color32 {
    if flag {
        AVAILABLE
    } else {
        UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_ends_differ_and_clamp() {
        assert_ne!(value_gradient(0.0), value_gradient(1.0));
        assert_eq!(value_gradient(-3.0), value_gradient(0.0));
        assert_eq!(value_gradient(7.0), value_gradient(1.0));
        assert_eq!(value_gradient(f64::NAN), value_gradient(0.0));
    }

    #[test]
    fn availability_colours() {
        assert_eq!(availability(true), AVAILABLE);
        assert_eq!(availability(false), UNAVAILABLE);
    }
}
