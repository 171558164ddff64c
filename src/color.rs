use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

/// sRGB colour of an HSL triple (hue in degrees).
fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb<u8> = Srgb::<f32>::from_color(Hsl::new(hue, saturation, lightness)).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Quantity → Color32
// ---------------------------------------------------------------------------

/// The three kinematic quantities shown in the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Acceleration,
    Velocity,
    Displacement,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Acceleration, Quantity::Velocity, Quantity::Displacement];

    fn index(self) -> usize {
        match self {
            Quantity::Acceleration => 0,
            Quantity::Velocity => 1,
            Quantity::Displacement => 2,
        }
    }

    /// Hue [deg]: blue, orange, green.
    fn hue(self) -> f32 {
        match self {
            Quantity::Acceleration => 210.0,
            Quantity::Velocity => 30.0,
            Quantity::Displacement => 130.0,
        }
    }
}

/// One colour per quantity, shared by its time history and its spectrum so a
/// row of the figure reads as a pair.
#[derive(Debug, Clone)]
pub struct SeriesPalette {
    colors: [Color32; 3],
}

impl Default for SeriesPalette {
    fn default() -> Self {
        SeriesPalette {
            colors: Quantity::ALL.map(|q| hsl_color(q.hue(), 0.75, 0.55)),
        }
    }
}

impl SeriesPalette {
    pub fn color_for(&self, quantity: Quantity) -> Color32 {
        self.colors[quantity.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries_convert_exactly() {
        assert_eq!(hsl_color(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_color(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
        assert_eq!(hsl_color(240.0, 0.0, 1.0), Color32::WHITE);
    }

    #[test]
    fn acceleration_is_drawn_in_blue() {
        let c = SeriesPalette::default().color_for(Quantity::Acceleration);
        assert!(c.b() > c.r() && c.b() > c.g(), "{c:?}");
    }

    #[test]
    fn quantities_get_distinct_colours() {
        let palette = SeriesPalette::default();
        let a = palette.color_for(Quantity::Acceleration);
        let v = palette.color_for(Quantity::Velocity);
        let d = palette.color_for(Quantity::Displacement);
        assert_ne!(a, v);
        assert_ne!(v, d);
        assert_ne!(a, d);
    }
}
