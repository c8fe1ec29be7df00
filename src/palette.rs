/// Outfit palette derived from a base skin tone.
use crate::color::{self, Hsl, Rgb};

/// Suggested garment colors. Order follows the hue offsets, not brightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub top: [Rgb; 3],
    pub bottom: [Rgb; 3],
}

pub fn generate(base: Rgb) -> Palette {
    let Hsl { h, s, l } = color::to_hsl(base);

    let complementary = (h + 180.0) % 360.0;
    let triadic1 = (h + 120.0) % 360.0;
    let triadic2 = (h + 240.0) % 360.0;

    // Brighter, more saturated
    let top = [
        shade(complementary, (s + 20.0).min(100.0), (l + 20.0).min(90.0)),
        shade(triadic1, (s + 10.0).min(100.0), (l + 30.0).min(90.0)),
        shade(triadic2, (s + 10.0).min(100.0), (l + 30.0).min(90.0)),
    ];

    // Muted and darker
    let bottom = [
        shade((h + 30.0) % 360.0, (s - 20.0).max(0.0), (l - 20.0).max(10.0)),
        shade((h + 210.0) % 360.0, (s - 10.0).max(0.0), (l - 30.0).max(10.0)),
        shade((h + 330.0) % 360.0, (s - 10.0).max(0.0), (l - 30.0).max(10.0)),
    ];

    Palette { top, bottom }
}

fn shade(h: f64, s: f64, l: f64) -> Rgb {
    color::to_hex(Hsl { h, s, l })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgb {
        s.parse().unwrap()
    }

    fn strings(colors: &[Rgb; 3]) -> [String; 3] {
        colors.map(|c| c.to_string())
    }

    #[test]
    fn red_base_palette() {
        let palette = generate(hex("#ff0000"));
        assert_eq!(strings(&palette.top), ["#66ffff", "#99ff99", "#9999ff"]);
        assert_eq!(strings(&palette.bottom), ["#8a4d0f", "#053361", "#610533"]);
    }

    #[test]
    fn first_swatches_use_complementary_and_warm_offsets() {
        let palette = generate(hex("#ff0000"));
        assert_eq!(palette.top[0], color::to_hex(Hsl { h: 180.0, s: 100.0, l: 70.0 }));
        assert_eq!(palette.bottom[0], color::to_hex(Hsl { h: 30.0, s: 80.0, l: 30.0 }));
    }

    #[test]
    fn green_base_palette() {
        let palette = generate(hex("#00ff00"));
        assert_eq!(strings(&palette.top), ["#ff66ff", "#9999ff", "#ff9999"]);
        assert_eq!(strings(&palette.bottom), ["#0f8a4d", "#610533", "#336105"]);
    }

    #[test]
    fn medium_skin_tone_palette() {
        let palette = generate(hex("#C68642"));
        assert_eq!(strings(&palette.top), ["#82b5ec", "#b3eed1", "#d1b3ee"]);
        assert_eq!(strings(&palette.bottom), ["#6b6c36", "#201f50", "#50201f"]);
    }

    #[test]
    fn extremes_hit_the_lightness_bounds() {
        // l + 30 is capped at 90, l - 30 floored at 10
        let white = generate(hex("#ffffff"));
        assert_eq!(white.bottom[0].to_string(), "#cccccc");
        assert_eq!(white.bottom[1].to_string(), "#b3b3b3");

        let black = generate(hex("#000000"));
        assert!(black.bottom.iter().all(|c| c.to_string() == "#1a1a1a"));
    }

    #[test]
    fn generate_is_deterministic() {
        let base = hex("#8d5524");
        assert_eq!(generate(base), generate(base));
    }
}
