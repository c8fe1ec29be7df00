mod help;
mod helpers;
mod styler;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, AppView, FocusMode};
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (title, body_text) = match app.view {
        AppView::Styler => (" Styler ", styler::build_styler_text(app)),
        AppView::Help => (" Help ", help::build_help_text()),
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header_lines = vec![Line::from(vec![
        Span::styled(
            "  Tonefit  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "outfit colors for your skin tone",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    let header = Paragraph::new(Text::from(header_lines))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(header, layout[0]);

    let mut body_lines = vec![
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    body_lines.extend(body_text.lines);
    body_lines.push(Line::from(""));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(Theme::dim()),
    )));
    body_lines.push(keybinds_line(app));
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(status_line(app)))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(footer, layout[2]);
}

fn rounded_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Theme::secondary()))
}

fn keybinds_line(app: &App) -> Line<'static> {
    let hints = match (app.view, app.focus_mode) {
        (AppView::Help, _) => "?/esc: Back   q: Quit",
        (AppView::Styler, FocusMode::Input) => "Type #RRGGBB   Backspace: Delete   Enter/Esc: Done",
        (AppView::Styler, FocusMode::Browse) => {
            if app.is_sampling() {
                "Esc: Cancel pick   ?: Help   q: Quit"
            } else {
                "i: Edit   e: Eyedropper   Up/Down/Enter: Presets   r: Random   ?: Help   q: Quit"
            }
        }
    };
    Line::from(Span::styled(
        format!("  {hints}"),
        Style::default().fg(Theme::dim()),
    ))
}

fn status_line(app: &App) -> Line<'_> {
    if let Some(status) = &app.status {
        let color = if app.is_sampling() {
            Theme::warn()
        } else {
            Theme::text()
        };
        return Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(color),
        ));
    }
    match app.base {
        Some(base) => Line::from(vec![
            Span::styled(" Base ", Style::default().fg(Theme::dim())),
            Span::styled(
                base.to_string(),
                Style::default()
                    .fg(helpers::to_color(base))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            " No skin tone selected",
            Style::default().fg(Theme::dim()),
        )),
    }
}
