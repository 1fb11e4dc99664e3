//! Units screen - the scrollable, filterable unit list

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::style::colors;
use crate::tui::app::App;

/// Render the unit list into `area`, updating the app's viewport-dependent
/// state (page size, scroll offset) from the actual layout height.
pub fn render_units(frame: &mut Frame, area: Rect, app: &mut App) {
    // Borders top/bottom plus the column header row
    let viewport = area.height.saturating_sub(3) as usize;
    app.page_size = viewport.max(1);
    app.ensure_cursor_visible(viewport.max(1));

    let view = app.view();
    let total = app.registry.len();
    let visible = view.len();

    let mut title = format!(" Units {visible}/{total} ");
    if !app.query.is_empty() {
        title.push_str(&format!("| filter: '{}' ", app.query));
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    if !app.has_loaded {
        let text = match &app.status {
            Some(status) => format!("{}  (R to retry)", status.text),
            None => "Loading units...".to_string(),
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(colors::UI_SECONDARY))
                .block(block),
            area,
        );
        return;
    }

    if view.is_empty() {
        let text = if app.query.is_empty() {
            "No units reported by the service manager".to_string()
        } else {
            format!("No units match '{}'", app.query)
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(colors::UI_SECONDARY))
                .block(block),
            area,
        );
        return;
    }

    let end = (app.scroll + viewport.max(1)).min(view.len());
    let rows: Vec<Row> = view[app.scroll..end]
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            let is_selected = app.scroll + i == app.cursor;

            let name_style = if is_selected {
                Style::default()
                    .fg(colors::UI_SELECTED)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::UI_TEXT)
            };
            let state_style =
                Style::default().fg(colors::active_state_color(&unit.active_state));

            let row_style = if is_selected {
                Style::default().bg(colors::UI_SELECTED_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(Span::styled(unit.name.clone(), name_style)),
                Cell::from(Span::styled(
                    unit.load_state.clone(),
                    Style::default().fg(colors::UI_SECONDARY),
                )),
                Cell::from(Span::styled(unit.active_state.clone(), state_style)),
                Cell::from(Span::styled(unit.sub_state.clone(), state_style)),
                Cell::from(Span::styled(
                    unit.description.clone(),
                    Style::default().fg(colors::UI_SECONDARY),
                )),
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(34),        // Unit
            Constraint::Length(9),      // Load
            Constraint::Length(10),     // Active
            Constraint::Length(10),     // Sub
            Constraint::Percentage(40), // Description
        ],
    )
    .header(
        Row::new(vec!["Unit", "Load", "Active", "Sub", "Description"]).style(
            Style::default()
                .fg(colors::UI_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(block);

    frame.render_widget(table, area);
}
