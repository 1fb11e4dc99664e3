//! Terminal User Interface for sdtui
//!
//! Owns the terminal lifecycle and the main event loop: input events and
//! background updates are multiplexed onto one UI task that holds the
//! session state, while a worker task does all the systemctl I/O.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::unbounded_channel;

mod app;
mod input;
mod screens;
mod widgets;
mod worker;

#[cfg(test)]
mod tests;

use app::{App, Mode, Overlay, StatusKind};
use input::handle_event;
use screens::{render_help, render_units};

use crate::style::colors;
use crate::systemd::SystemdGateway;

/// Run the TUI session until the user quits.
///
/// # Errors
/// Returns an error if terminal initialization fails; gateway failures are
/// non-fatal and surface in the status line instead.
pub async fn run(user: bool) -> Result<()> {
    // Install a panic hook to restore the terminal on panic (best-effort),
    // wrapping the existing hook so the report still prints normally.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), Show);
        original_hook(info);
    }));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Terminal guard to ensure we restore terminal state on early return
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            let _ = execute!(std::io::stdout(), Show);
        }
    }
    let _term_guard = TerminalGuard;

    let mut app = App::new();

    // Background update channel (worker -> UI) is unbounded; the command
    // channel (UI -> worker) is bounded and used with non-blocking try_send.
    let (update_tx, update_rx) = unbounded_channel();
    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::channel(64);
    app.bg_update_rx = Some(update_rx);
    app.bg_cmd_tx = Some(cmd_tx);

    let gateway = Arc::new(SystemdGateway::new(user));
    let bg_handle = tokio::spawn(worker::run_worker(
        gateway,
        worker::REFRESH_INTERVAL,
        cmd_rx,
        update_tx,
    ));

    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    bg_handle.abort();

    result
}

/// Main application loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    const TICK_MS: u64 = 120; // spinner frame cadence

    let mut tick = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
    let mut events = EventStream::new();

    app.dirty = true;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if app.action_pending {
                    app.throbber_state.calc_next();
                    app.dirty = true;
                }
            }
            Some(Ok(event)) = events.next() => {
                handle_event(app, &event);
            }
            maybe_update = async {
                if let Some(rx) = &mut app.bg_update_rx { rx.recv().await } else { None }
            } => {
                if let Some(update) = maybe_update {
                    app.apply_update(update);
                }
            }
        }

        if app.dirty {
            terminal.draw(|frame| render_ui(frame, app))?;
            app.dirty = false;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the complete UI: header, unit list, footer, then any overlay.
fn render_ui(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Unit list
            Constraint::Length(1), // Footer
        ])
        .split(size);

    render_header(frame, chunks[0]);
    render_units(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    match app.overlay.clone() {
        Overlay::None => {}
        Overlay::Help => render_help(frame, size),
        Overlay::Confirm { action, unit } => {
            widgets::render_confirm(frame, size, action, &unit);
        }
        Overlay::Details { unit } => {
            widgets::render_details(frame, size, &unit, app.registry.get(&unit));
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            concat!("sdtui ", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(colors::UI_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  systemd units"),
    ]);
    frame.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::NONE)),
        area,
    );
}

/// Footer: search prompt while typing, otherwise status message or key hints.
fn render_footer(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.mode == Mode::Search {
        let text = Line::from(vec![
            Span::styled("/", Style::default().fg(colors::UI_HIGHLIGHT)),
            Span::raw(app.query.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(
                "   [Enter] keep filter  [Esc] discard",
                Style::default().fg(colors::UI_SECONDARY),
            ),
        ]);
        frame.render_widget(Paragraph::new(text), area);
        return;
    }

    if app.action_pending {
        // Spinner on the left, message to the right
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        let throb =
            throbber_widgets_tui::Throbber::default().style(Style::default().fg(colors::UI_WARNING));
        frame.render_stateful_widget(throb, chunks[0], &mut app.throbber_state);

        let text = match &app.status {
            Some(status) => Line::from(status.text.clone()),
            None => Line::from("Action in progress..."),
        };
        frame.render_widget(Paragraph::new(text), chunks[1]);
        return;
    }

    let text = if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => colors::UI_TEXT,
            StatusKind::ActionError | StatusKind::RefreshError => colors::UI_ERROR,
        };
        Line::from(vec![
            Span::styled("● ", Style::default().fg(colors::UI_WARNING)),
            Span::styled(status.text.clone(), Style::default().fg(color)),
        ])
    } else {
        Line::from(vec![
            Span::raw("[q] Quit  "),
            Span::styled("[/]", Style::default().fg(colors::UI_HIGHLIGHT)),
            Span::raw(" Search  "),
            Span::styled("[s/x/r]", Style::default().fg(colors::UI_HIGHLIGHT)),
            Span::raw(" Start/Stop/Restart  "),
            Span::styled("[?]", Style::default().fg(colors::UI_HIGHLIGHT)),
            Span::raw(" Help"),
        ])
    };
    frame.render_widget(Paragraph::new(text), area);
}
