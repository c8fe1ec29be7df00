use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&["q: Quit", "?: Toggle help", "esc: Back"]));

    lines.push(Line::from(""));
    lines.push(section_title("Skin tone"));
    lines.extend(section_lines(&[
        "i or /: Edit the color code",
        "e: Pick a color with the eyedropper",
        "Esc: Cancel a running pick",
        "c: Clear the color field (suggestions stay)",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Presets"));
    lines.extend(section_lines(&[
        "Up/Down: Move selection",
        "Enter: Use selected preset",
        "r: Random preset",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Editing"));
    lines.extend(section_lines(&[
        "Type #RRGGBB: suggestions update as soon as the code is complete",
        "Backspace: Delete",
        "Enter/Esc: Stop editing",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
