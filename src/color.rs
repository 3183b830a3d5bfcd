use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::sentiment::Label;

// ---------------------------------------------------------------------------
// Label colours
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Green for positive, red for negative, desaturated for neutral.
pub fn label_color(label: Label) -> Color32 {
    match label {
        Label::Positive => hsl_to_color32(130.0, 0.60, 0.45),
        Label::Neutral => hsl_to_color32(210.0, 0.10, 0.55),
        Label::Negative => hsl_to_color32(0.0, 0.70, 0.55),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_get_distinct_colours() {
        let [p, n, m] = Label::ALL.map(label_color);
        assert_ne!(p, n);
        assert_ne!(p, m);
        assert_ne!(n, m);
    }

    #[test]
    fn positive_leans_green_and_negative_leans_red() {
        let pos = label_color(Label::Positive);
        let neg = label_color(Label::Negative);
        assert!(pos.g() > pos.r());
        assert!(neg.r() > neg.g());
    }
}
