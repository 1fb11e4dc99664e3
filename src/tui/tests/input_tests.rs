//! Key-routing tests: full event paths through browse, search, and overlays

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use crate::systemd::UnitAction;
use crate::test_utils::unit;
use crate::tui::app::{App, AppUpdate, Mode, Overlay, StatusKind};
use crate::tui::input::simulate_key_event;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn make_app() -> App {
    let mut app = App::new();
    app.apply_update(AppUpdate::Snapshot {
        seq: 1,
        units: vec![
            unit("alpha.service", "active", "running"),
            unit("beta.service", "inactive", "dead"),
            unit("gamma.service", "failed", "failed"),
        ],
    });
    app
}

#[test]
fn arrows_move_cursor_within_bounds() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Down));
    simulate_key_event(&mut app, key(KeyCode::Down));
    simulate_key_event(&mut app, key(KeyCode::Down));
    assert_eq!(app.cursor, 2, "cursor clamps at the last row");
    simulate_key_event(&mut app, key(KeyCode::Up));
    assert_eq!(app.cursor, 1);
}

#[test]
fn vim_keys_mirror_arrows() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('j')));
    assert_eq!(app.cursor, 1);
    simulate_key_event(&mut app, key(KeyCode::Char('k')));
    assert_eq!(app.cursor, 0);
}

#[test]
fn search_round_trip_with_escape_restores_full_view() {
    let mut app = make_app();

    simulate_key_event(&mut app, key(KeyCode::Char('/')));
    assert_eq!(app.mode, Mode::Search);

    simulate_key_event(&mut app, key(KeyCode::Char('b')));
    assert_eq!(app.query, "b");
    assert_eq!(app.view_len(), 1);

    // Escape discards the query and reverts to the unfiltered registry
    simulate_key_event(&mut app, key(KeyCode::Esc));
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.query, "");
    assert_eq!(app.view_len(), 3);
    assert_eq!(app.cursor, 0);
}

#[test]
fn search_commit_keeps_filter_and_actions_hit_view_rows() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('/')));
    simulate_key_event(&mut app, key(KeyCode::Char('a')));
    simulate_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.mode, Mode::Browse);
    // "a" matches alpha, beta, gamma... narrow further
    simulate_key_event(&mut app, key(KeyCode::Char('/')));
    for c in "gam".chars() {
        simulate_key_event(&mut app, key(KeyCode::Char(c)));
    }
    simulate_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.view_len(), 1);

    // Action applies to view index 0 = gamma, not registry index 0 = alpha
    simulate_key_event(&mut app, key(KeyCode::Char('r')));
    assert_eq!(
        app.overlay,
        Overlay::Confirm {
            action: UnitAction::Restart,
            unit: "gamma.service".to_string()
        }
    );
}

#[test]
fn backspace_edits_query_and_resets_cursor() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('/')));
    simulate_key_event(&mut app, key(KeyCode::Char('b')));
    simulate_key_event(&mut app, key(KeyCode::Char('e')));
    simulate_key_event(&mut app, key(KeyCode::Down));
    simulate_key_event(&mut app, key(KeyCode::Backspace));
    assert_eq!(app.query, "b");
    assert_eq!(app.cursor, 0);
}

#[test]
fn action_keys_open_confirm_dialog() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('s')));
    assert_eq!(
        app.overlay,
        Overlay::Confirm {
            action: UnitAction::Start,
            unit: "alpha.service".to_string()
        }
    );

    // Esc cancels without dispatching
    simulate_key_event(&mut app, key(KeyCode::Esc));
    assert_eq!(app.overlay, Overlay::None);
    assert!(!app.action_pending);
}

#[test]
fn action_keys_do_nothing_on_empty_view() {
    let mut app = App::new();
    app.apply_update(AppUpdate::Snapshot {
        seq: 1,
        units: Vec::new(),
    });
    simulate_key_event(&mut app, key(KeyCode::Char('x')));
    assert_eq!(app.overlay, Overlay::None);
}

#[test]
fn keypress_clears_transient_status() {
    let mut app = make_app();
    app.set_status(StatusKind::ActionError, "boom".to_string());
    simulate_key_event(&mut app, key(KeyCode::Down));
    assert!(app.status.is_none());
}

#[test]
fn escape_in_browse_clears_committed_filter() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('/')));
    simulate_key_event(&mut app, key(KeyCode::Char('b')));
    simulate_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.view_len(), 1);
    simulate_key_event(&mut app, key(KeyCode::Esc));
    assert_eq!(app.view_len(), 3);
}

#[test]
fn enter_opens_details_and_any_key_closes() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(
        app.overlay,
        Overlay::Details {
            unit: "alpha.service".to_string()
        }
    );
    simulate_key_event(&mut app, key(KeyCode::Char(' ')));
    assert_eq!(app.overlay, Overlay::None);
}

#[test]
fn quit_key_ends_the_session() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn ctrl_c_quits_even_from_search_mode() {
    let mut app = make_app();
    simulate_key_event(&mut app, key(KeyCode::Char('/')));
    simulate_key_event(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(app.should_quit);
}
