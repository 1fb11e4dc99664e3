//! Help overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::style::colors;
use crate::tui::widgets::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("Up/Down, k/j", "Move cursor"),
    ("PgUp/PgDn", "Page move"),
    ("/", "Search (Enter keeps filter, Esc discards)"),
    ("Esc", "Clear active filter"),
    ("Enter", "Unit details"),
    ("s", "Start unit"),
    ("x", "Stop unit"),
    ("r", "Restart unit"),
    ("e", "Enable unit"),
    ("d", "Disable unit"),
    ("R", "Refresh now"),
    ("?", "This help"),
    ("q", "Quit"),
];

/// Render the help overlay on top of the unit list.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let height = BINDINGS.len() as u16 + 4;
    let popup = centered_rect(52, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .border_style(Style::default().fg(colors::UI_HIGHLIGHT));

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<14}"),
                    Style::default().fg(colors::UI_HIGHLIGHT),
                ),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close...",
        Style::default().add_modifier(Modifier::DIM),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
