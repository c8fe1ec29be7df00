use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::color::Rgb;

pub const SWATCH: &str = "███████";

pub fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub fn swatch(color: Rgb) -> Span<'static> {
    Span::styled(SWATCH, Style::default().fg(to_color(color)))
}

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_maps_to_terminal_color() {
        assert_eq!(to_color(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn clamp_name_pads_and_truncates() {
        assert_eq!(clamp_name("Sand", 6), "Sand  ");
        assert_eq!(clamp_name("Porcelain", 6), "Porc..");
    }

    #[test]
    fn swatch_is_as_wide_as_a_hex_label() {
        assert_eq!(SWATCH.chars().count(), "#rrggbb".len());
    }
}
