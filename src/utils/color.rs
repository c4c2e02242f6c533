use eframe::egui::Color32;

pub trait ColorExt {
    /// Parses `#rrggbb` or the `#rgb` shorthand.
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;

    /// Same hue at the given opacity, for panel fills.
    fn faded(self, opacity: f32) -> Self;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 => Some(Color32::from_rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let mut rgb = [0u8; 3];
                for (i, digit) in hex.chars().enumerate() {
                    rgb[i] = channel(&digit.to_string())? * 17;
                }
                Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
            }
            _ => None,
        }
    }

    fn faded(self, opacity: f32) -> Self {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.r(), self.g(), self.b(), alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(
            Color32::from_hex("#fbbf24"),
            Some(Color32::from_rgb(0xfb, 0xbf, 0x24))
        );
        assert_eq!(Color32::from_hex("f00"), Some(Color32::from_rgb(255, 0, 0)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Color32::from_hex("#12345"), None);
        assert_eq!(Color32::from_hex("#zzzzzz"), None);
        assert_eq!(Color32::from_hex("#ééé"), None);
    }

    #[test]
    fn faded_keeps_hue() {
        let faded = Color32::from_rgb(0xef, 0x44, 0x44).faded(0.0);
        assert_eq!(faded.a(), 0);
        let opaque = Color32::from_rgb(0xef, 0x44, 0x44).faded(1.0);
        assert_eq!(opaque, Color32::from_rgb(0xef, 0x44, 0x44));
    }
}
