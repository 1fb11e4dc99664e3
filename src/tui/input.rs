//! Input handling for keyboard events
//!
//! Translates key events into session-state transitions. Keys are routed by
//! overlay first, then by navigation mode, so a confirm dialog can never
//! leak a keystroke into the list underneath it.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Mode, Overlay};
use crate::systemd::UnitAction;

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: &Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, *key),
        Event::Resize(_, _) => {
            // Ratatui reflows on the next draw; just mark the frame dirty
            app.dirty = true;
        }
        _ => {}
    }
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits immediately
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Any keypress retires the transient status line; handlers below may
    // set a fresh one for this key.
    app.clear_status();

    if app.overlay != Overlay::None {
        handle_overlay_input(app, key);
        return;
    }

    match app.mode {
        Mode::Search => handle_search_input(app, key),
        Mode::Browse => handle_browse_input(app, key),
    }
}

/// Keys while a modal overlay is up
fn handle_overlay_input(app: &mut App, key: KeyEvent) {
    match app.overlay.clone() {
        Overlay::Confirm { action, unit } => match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.dispatch_action(action, unit);
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                app.overlay = Overlay::None;
                app.dirty = true;
            }
            _ => {}
        },
        // Help and details close on any key
        Overlay::Help | Overlay::Details { .. } => {
            app.overlay = Overlay::None;
            app.dirty = true;
        }
        Overlay::None => {}
    }
}

/// Keys in Browse mode
fn handle_browse_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }

        // Cursor movement, clamped to the current filtered view
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),

        KeyCode::Char('/') => app.enter_search(),

        // Esc drops a committed filter, restoring the full list
        KeyCode::Esc => {
            if !app.query.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Enter => {
            if let Some(unit) = app.selected_unit() {
                app.overlay = Overlay::Details {
                    unit: unit.name.clone(),
                };
                app.dirty = true;
            }
        }

        // Actions on the selected unit, behind a confirm dialog
        KeyCode::Char('s') => app.request_action(UnitAction::Start),
        KeyCode::Char('x') => app.request_action(UnitAction::Stop),
        KeyCode::Char('r') => app.request_action(UnitAction::Restart),
        KeyCode::Char('e') => app.request_action(UnitAction::Enable),
        KeyCode::Char('d') => app.request_action(UnitAction::Disable),

        KeyCode::Char('R') => app.request_refresh(),

        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            app.dirty = true;
        }

        _ => {}
    }
}

/// Keys in Search mode
fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

/// Test helper: feed a key event through the full routing logic.
#[cfg(test)]
pub(crate) fn simulate_key_event(app: &mut App, key: KeyEvent) {
    handle_key_event(app, key);
}
