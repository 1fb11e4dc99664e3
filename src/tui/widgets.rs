//! Shared TUI widgets: modal helpers, confirm dialog, unit details popup

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::registry::UnitRecord;
use crate::style::colors;
use crate::systemd::UnitAction;

/// Center a `width` x `height` rectangle inside `area`, clamped to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Confirm dialog shown before dispatching an action.
pub fn render_confirm(frame: &mut Frame, area: Rect, action: UnitAction, unit: &str) {
    let prompt = format!("{} {unit}?", capitalized_verb(action));
    // centered_rect clamps to the terminal, so only a lower bound here
    let width = (prompt.len() as u16 + 8).max(30);
    let popup = centered_rect(width, 5, area);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirm ")
        .border_style(Style::default().fg(colors::UI_WARNING));
    let text = vec![
        Line::from(prompt),
        Line::from(vec![
            Span::styled("[Enter/y]", Style::default().fg(colors::UI_HIGHLIGHT)),
            Span::raw(" confirm  "),
            Span::styled("[Esc/n]", Style::default().fg(colors::UI_HIGHLIGHT)),
            Span::raw(" cancel"),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        popup,
    );
}

/// Unit details popup. `record` is looked up fresh from the registry; a unit
/// refreshed away since the popup opened renders as gone rather than stale.
pub fn render_details(frame: &mut Frame, area: Rect, name: &str, record: Option<&UnitRecord>) {
    let popup = centered_rect(area.width.saturating_sub(8).min(90), 12, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {name} "))
        .border_style(Style::default().fg(colors::UI_HIGHLIGHT));

    let lines = match record {
        Some(unit) => vec![
            detail_line("Load:   ", &unit.load_state, colors::UI_TEXT),
            detail_line(
                "Active: ",
                &unit.active_state,
                colors::active_state_color(&unit.active_state),
            ),
            detail_line("Sub:    ", &unit.sub_state, colors::UI_TEXT),
            Line::from(""),
            Line::from(Span::styled(
                "Description:",
                Style::default().fg(colors::UI_SECONDARY),
            )),
            Line::from(unit.description.clone()),
        ],
        None => vec![Line::from(Span::styled(
            "Unit no longer present in the last snapshot",
            Style::default().fg(colors::UI_WARNING),
        ))],
    };

    let mut text = lines;
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key to close...",
        Style::default().add_modifier(Modifier::DIM),
    )));

    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn detail_line<'a>(label: &'a str, value: &str, color: ratatui::style::Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(colors::UI_SECONDARY)),
        Span::styled(value.to_string(), Style::default().fg(color)),
    ])
}

fn capitalized_verb(action: UnitAction) -> &'static str {
    match action {
        UnitAction::Start => "Start",
        UnitAction::Stop => "Stop",
        UnitAction::Restart => "Restart",
        UnitAction::Enable => "Enable",
        UnitAction::Disable => "Disable",
    }
}
