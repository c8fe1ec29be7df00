/// Hex and HSL color conversions.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 24-bit RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("color must have exactly 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("'{0}' is not a hex digit")]
    BadDigit(char),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Strict `#RRGGBB`, case-insensitive. No surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ParseColorError::MissingHash)?;
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::BadDigit(bad));
        }
        if digits.len() != 6 {
            return Err(ParseColorError::BadLength(digits.len()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ParseColorError::BadDigit(digits.as_bytes()[i] as char))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn to_hsl(color: Rgb) -> Hsl {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h / 6.0 * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Saturation and lightness are used as given; hue wraps.
pub fn to_hex(hsl: Hsl) -> Rgb {
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let k = (n + hsl.h / 30.0).rem_euclid(12.0);
        let value = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * value).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(0.0), channel(8.0), channel(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgb {
        s.parse().unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn parses_mixed_case_and_prints_lowercase() {
        let color = hex("#C68642");
        assert_eq!(color, Rgb::new(0xc6, 0x86, 0x42));
        assert_eq!(color.to_string(), "#c68642");
        assert_eq!(hex("#aBcDeF").to_string(), "#abcdef");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("red".parse::<Rgb>(), Err(ParseColorError::MissingHash));
        assert_eq!("#12345".parse::<Rgb>(), Err(ParseColorError::BadLength(5)));
        assert_eq!("#1234567".parse::<Rgb>(), Err(ParseColorError::BadLength(7)));
        assert_eq!("#gggggg".parse::<Rgb>(), Err(ParseColorError::BadDigit('g')));
        assert_eq!(" #ffffff".parse::<Rgb>(), Err(ParseColorError::MissingHash));
        assert!("#ff00ff ".parse::<Rgb>().is_err());
    }

    #[test]
    fn is_valid_hex_matches_parser() {
        for input in ["#ff0000", "#ABCDEF", "#12345", "red", "#gggggg", "ff0000", ""] {
            assert_eq!(is_valid_hex(input), input.parse::<Rgb>().is_ok(), "{input}");
        }
    }

    #[test]
    fn primary_colors_to_hsl() {
        let red = to_hsl(hex("#ff0000"));
        assert_close(red.h, 0.0);
        assert_close(red.s, 100.0);
        assert_close(red.l, 50.0);

        let green = to_hsl(hex("#00ff00"));
        assert_close(green.h, 120.0);
        assert_close(green.s, 100.0);
        assert_close(green.l, 50.0);

        let blue = to_hsl(hex("#0000ff"));
        assert_close(blue.h, 240.0);
    }

    #[test]
    fn gray_is_achromatic() {
        let gray = to_hsl(hex("#808080"));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert_close(gray.l, 128.0 / 255.0 * 100.0);
    }

    #[test]
    fn red_max_with_blue_above_green_wraps_hue() {
        // #ff0080: hue just below 360
        let hsl = to_hsl(hex("#ff0080"));
        assert!(hsl.h > 300.0 && hsl.h < 360.0, "{}", hsl.h);
    }

    #[test]
    fn hsl_to_hex_known_values() {
        let cases = [
            ((0.0, 100.0, 50.0), "#ff0000"),
            ((120.0, 100.0, 50.0), "#00ff00"),
            ((240.0, 100.0, 50.0), "#0000ff"),
            ((180.0, 100.0, 70.0), "#66ffff"),
            ((30.0, 80.0, 30.0), "#8a4d0f"),
            ((0.0, 0.0, 0.0), "#000000"),
            ((0.0, 0.0, 100.0), "#ffffff"),
        ];
        for ((h, s, l), expected) in cases {
            assert_eq!(to_hex(Hsl { h, s, l }).to_string(), expected, "({h}, {s}, {l})");
        }
    }

    #[test]
    fn hue_wraps_in_both_directions() {
        let base = to_hex(Hsl { h: 30.0, s: 60.0, l: 40.0 });
        assert_eq!(to_hex(Hsl { h: 390.0, s: 60.0, l: 40.0 }), base);
        assert_eq!(to_hex(Hsl { h: -330.0, s: 60.0, l: 40.0 }), base);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_within_one_per_channel(r: u8, g: u8, b: u8) {
                let original = Rgb::new(r, g, b);
                let round_tripped = to_hex(to_hsl(original));
                prop_assert!((i16::from(round_tripped.r) - i16::from(r)).abs() <= 1, "r: {original} vs {round_tripped}");
                prop_assert!((i16::from(round_tripped.g) - i16::from(g)).abs() <= 1, "g: {original} vs {round_tripped}");
                prop_assert!((i16::from(round_tripped.b) - i16::from(b)).abs() <= 1, "b: {original} vs {round_tripped}");
            }

            #[test]
            fn hsl_components_stay_in_range(r: u8, g: u8, b: u8) {
                let hsl = to_hsl(Rgb::new(r, g, b));
                prop_assert!((0.0..360.0).contains(&hsl.h), "h = {}", hsl.h);
                prop_assert!((0.0..=100.0).contains(&hsl.s), "s = {}", hsl.s);
                prop_assert!((0.0..=100.0).contains(&hsl.l), "l = {}", hsl.l);
            }

            #[test]
            fn display_parses_back(r: u8, g: u8, b: u8) {
                let color = Rgb::new(r, g, b);
                prop_assert_eq!(color.to_string().parse::<Rgb>(), Ok(color));
            }
        }
    }
}
