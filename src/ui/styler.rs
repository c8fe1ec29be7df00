use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{SWATCH, clamp_name, swatch, to_color};
use super::theme::Theme;
use crate::app::{App, FocusMode};
use crate::color::Rgb;

const LABEL_WIDTH: usize = 11;

pub fn build_styler_text(app: &App) -> Text<'_> {
    let mut lines = vec![input_line(app), hsl_line(app), Line::from("")];

    lines.push(heading("Suggested colors"));
    match &app.palette {
        Some(palette) => {
            lines.extend(swatch_rows("Top", &palette.top));
            lines.push(Line::from(""));
            lines.extend(swatch_rows("Bottom", &palette.bottom));
        }
        None => lines.push(Line::from(Span::styled(
            "  Enter a skin tone (#RRGGBB), pick one with 'e', or choose a preset.",
            Style::default().fg(Theme::dim()),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(heading("Presets"));
    lines.extend(preset_lines(app));

    Text::from(lines)
}

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn label(text: &str) -> Span<'static> {
    Span::styled(
        format!("  {}", clamp_name(text, LABEL_WIDTH)),
        Style::default().fg(Theme::dim()),
    )
}

fn input_line(app: &App) -> Line<'_> {
    let editing = app.focus_mode == FocusMode::Input;
    let valid = app.input_is_valid();
    let mut style = if valid {
        Style::default().fg(Theme::text())
    } else {
        Style::default().fg(Theme::warn())
    };
    if editing {
        style = style.fg(Theme::highlight()).add_modifier(Modifier::BOLD);
    }

    let shown = if app.input.is_empty() && !editing {
        Span::styled("#RRGGBB", Style::default().fg(Theme::dim()))
    } else {
        Span::styled(app.input.as_str(), style)
    };

    let mut spans = vec![label("Skin tone"), Span::raw("["), shown];
    if editing {
        spans.push(Span::styled("_", Style::default().fg(Theme::highlight())));
    }
    spans.push(Span::raw("]"));
    if let Some(base) = app.base {
        spans.push(Span::raw("  "));
        spans.push(swatch(base));
    }
    if !valid && !app.input.is_empty() && app.palette.is_some() {
        spans.push(Span::styled(
            "  showing last valid color",
            Style::default().fg(Theme::dim()),
        ));
    }
    Line::from(spans)
}

fn hsl_line(app: &App) -> Line<'static> {
    let Some(hsl) = app.base_hsl else {
        return Line::from("");
    };
    // Hues in [359.5, 360) round to a full turn
    let h = hsl.h.round() % 360.0;
    Line::from(vec![
        label("HSL"),
        Span::styled(
            format!("H {h:.0}°  S {:.0}%  L {:.0}%", hsl.s, hsl.l),
            Style::default().fg(Theme::text()),
        ),
    ])
}

/// A row of swatches with the hex code under each.
fn swatch_rows(title: &str, colors: &[Rgb]) -> [Line<'static>; 2] {
    let mut swatches = vec![label(title)];
    let mut names = vec![label("")];
    for color in colors {
        swatches.push(swatch(*color));
        swatches.push(Span::raw("  "));
        names.push(Span::styled(
            format!("{:<width$}", color.to_string(), width = SWATCH.chars().count()),
            Style::default().fg(Theme::text()),
        ));
        names.push(Span::raw("  "));
    }
    [Line::from(swatches), Line::from(names)]
}

fn preset_lines(app: &App) -> Vec<Line<'_>> {
    if app.presets.is_empty() {
        return vec![Line::from(Span::styled(
            "  No presets.",
            Style::default().fg(Theme::dim()),
        ))];
    }
    app.presets
        .iter()
        .enumerate()
        .map(|(index, preset)| {
            let selected = index == app.selected_preset_index;
            let marker_style = if selected {
                Style::default()
                    .fg(Theme::selection_marker())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::dim())
            };
            let name_style = if selected {
                Style::default()
                    .fg(Theme::text())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::text())
            };
            Line::from(vec![
                Span::styled(if selected { "  > " } else { "    " }, marker_style),
                Span::styled(clamp_name(&preset.name, 14), name_style),
                Span::raw(" "),
                Span::styled("███", Style::default().fg(to_color(preset.color))),
                Span::raw(" "),
                Span::styled(preset.color.to_string(), Style::default().fg(Theme::dim())),
            ])
        })
        .collect()
}
