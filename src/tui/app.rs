//! TUI session state
//!
//! One [`App`] per running session. It owns the registry snapshot, the
//! search query, and the navigation state, and it is only ever mutated on
//! the UI task - background results arrive as [`AppUpdate`] messages and are
//! folded in by [`App::apply_update`].

use tracing::debug;

use crate::filter::filter_units;
use crate::registry::{UnitRecord, UnitRegistry};
use crate::systemd::{GatewayError, UnitAction};

/// Navigation mode: browsing the list or editing the search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
}

/// Modal overlay drawn on top of the unit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    /// Ask before running an action against the selected unit.
    Confirm { action: UnitAction, unit: String },
    /// Unit detail popup. Holds the name, not an index: the registry may be
    /// replaced under the popup by a background refresh.
    Details { unit: String },
}

/// Where a status line came from, controlling when it is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    /// A dispatched action failed. Cleared on the next keypress only - the
    /// follow-up refresh lands within a second and would wipe the message
    /// before the operator can read it.
    ActionError,
    /// A refresh failed. Cleared by the next successful refresh (the list
    /// is current again) or the next keypress.
    RefreshError,
}

/// Transient message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

/// Messages sent from the background worker to the UI task.
#[derive(Debug)]
pub enum AppUpdate {
    /// A fresh unit snapshot. `seq` orders snapshots so a stale in-flight
    /// result can never overwrite a newer one.
    Snapshot { seq: u64, units: Vec<UnitRecord> },
    /// A refresh attempt failed; the registry is left untouched.
    RefreshFailed { seq: u64, message: String },
    /// Outcome of a dispatched control action.
    ActionResult {
        unit: String,
        action: UnitAction,
        outcome: Result<(), GatewayError>,
    },
}

/// Commands sent from the UI task to the background worker.
#[derive(Debug)]
pub enum BgCommand {
    Refresh,
    Control { action: UnitAction, unit: String },
}

/// Footer text while a manual refresh is pending.
const REFRESHING_MSG: &str = "Refreshing...";

/// Application state for one interactive session.
pub struct App {
    /// Latest unit snapshot, replaced wholesale on refresh
    pub registry: UnitRegistry,
    /// Current search query (live while in Search mode, committed after Enter)
    pub query: String,
    pub mode: Mode,
    pub overlay: Overlay,
    /// Cursor index into the current filtered view
    pub cursor: usize,
    /// First visible row of the filtered view
    pub scroll: usize,
    /// Rows the list viewport can show; updated from the layout every frame
    pub page_size: usize,
    /// Transient footer message
    pub status: Option<StatusLine>,
    /// Whether at least one refresh has completed successfully
    pub has_loaded: bool,
    /// Whether a dispatched action is still in flight (drives the spinner)
    pub action_pending: bool,
    pub should_quit: bool,
    /// Whether the UI needs to be redrawn
    pub dirty: bool,

    last_applied_seq: u64,

    /// Channel sender for commands to the background worker (bounded,
    /// non-blocking `try_send`)
    pub bg_cmd_tx: Option<tokio::sync::mpsc::Sender<BgCommand>>,
    /// Channel receiver for background updates (set by `run()`)
    pub bg_update_rx: Option<tokio::sync::mpsc::UnboundedReceiver<AppUpdate>>,
    /// Spinner state for the pending-action indicator
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: UnitRegistry::new(),
            query: String::new(),
            mode: Mode::Browse,
            overlay: Overlay::None,
            cursor: 0,
            scroll: 0,
            page_size: 1,
            status: None,
            has_loaded: false,
            action_pending: false,
            should_quit: false,
            dirty: true,
            last_applied_seq: 0,
            bg_cmd_tx: None,
            bg_update_rx: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    // ========================================================================
    // Filtered view
    // ========================================================================

    /// The current filtered view: a pure function of (registry, query),
    /// recomputed on every access so it can never go stale.
    #[must_use]
    pub fn view(&self) -> Vec<&UnitRecord> {
        filter_units(self.registry.all(), &self.query)
    }

    #[must_use]
    pub fn view_len(&self) -> usize {
        self.view().len()
    }

    /// The unit under the cursor in the filtered view (not the registry:
    /// after filtering, view index 0 may be registry index 40).
    #[must_use]
    pub fn selected_unit(&self) -> Option<&UnitRecord> {
        self.view().get(self.cursor).copied()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Re-establish the cursor invariant: a valid index into the current
    /// view, or 0 when the view is empty. Every operation that can change
    /// the view's length calls this in the same step.
    pub fn clamp_cursor(&mut self) {
        let len = self.view_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor > len - 1 {
            self.cursor = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.dirty = true;
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.view_len() {
            self.cursor += 1;
        }
        self.dirty = true;
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size.max(1));
        self.dirty = true;
    }

    pub fn page_down(&mut self) {
        let len = self.view_len();
        if len > 0 {
            self.cursor = (self.cursor + self.page_size.max(1)).min(len - 1);
        }
        self.dirty = true;
    }

    /// Keep the cursor inside the viewport of `height` rows, adjusting the
    /// scroll offset. Called by the renderer once the layout height is known.
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let len = self.view_len();
        let max_scroll = len.saturating_sub(height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Enter search mode with a fresh (empty, so initially unfiltered) query.
    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.query.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.dirty = true;
    }

    /// Append a character to the query. The view shrinks or grows, so the
    /// cursor resets to 0 rather than pointing past the new bounds.
    pub fn search_push(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
        self.scroll = 0;
        self.dirty = true;
    }

    pub fn search_backspace(&mut self) {
        self.query.pop();
        self.cursor = 0;
        self.scroll = 0;
        self.dirty = true;
    }

    /// Enter: keep the query and the current filtered view.
    pub fn commit_search(&mut self) {
        self.mode = Mode::Browse;
        self.clamp_cursor();
        self.dirty = true;
    }

    /// Escape: discard the query, restoring the full unfiltered list.
    pub fn cancel_search(&mut self) {
        self.mode = Mode::Browse;
        self.clear_filter();
    }

    /// Drop a committed filter and show the complete registry again.
    pub fn clear_filter(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.dirty = true;
    }

    // ========================================================================
    // Status line
    // ========================================================================

    pub fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(StatusLine { text, kind });
        self.dirty = true;
    }

    /// Any keypress clears the transient status line.
    pub fn clear_status(&mut self) {
        if self.status.is_some() {
            self.status = None;
            self.dirty = true;
        }
    }

    // ========================================================================
    // Actions and background updates
    // ========================================================================

    /// Ask for confirmation before dispatching `action` on the selected
    /// unit. No-op on an empty view: there is nothing to act on.
    pub fn request_action(&mut self, action: UnitAction) {
        let Some(unit) = self.selected_unit() else {
            return;
        };
        self.overlay = Overlay::Confirm {
            action,
            unit: unit.name.clone(),
        };
        self.dirty = true;
    }

    /// Dispatch the confirmed action to the background worker.
    pub fn dispatch_action(&mut self, action: UnitAction, unit: String) {
        if let Some(tx) = &self.bg_cmd_tx {
            match tx.try_send(BgCommand::Control {
                action,
                unit: unit.clone(),
            }) {
                Ok(()) => {
                    self.action_pending = true;
                    self.set_status(
                        StatusKind::Info,
                        format!("Requested {} of {unit}...", action.verb()),
                    );
                }
                Err(e) => {
                    debug!("dropping action, command channel full: {e}");
                    self.set_status(
                        StatusKind::ActionError,
                        "Worker busy, action dropped - try again".to_string(),
                    );
                }
            }
        }
        self.overlay = Overlay::None;
        self.dirty = true;
    }

    /// Ask the worker for an immediate refresh (manual `R` key).
    pub fn request_refresh(&mut self) {
        if let Some(tx) = &self.bg_cmd_tx {
            let _ = tx.try_send(BgCommand::Refresh);
        }
        self.set_status(StatusKind::Info, REFRESHING_MSG.to_string());
    }

    /// Fold a background update into the session state. This is the single
    /// synchronization point: workers never touch the registry directly.
    pub fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::Snapshot { seq, units } => {
                if seq <= self.last_applied_seq {
                    debug!("discarding stale snapshot seq={seq}");
                    return;
                }
                self.last_applied_seq = seq;
                self.registry.replace(units);
                self.has_loaded = true;
                self.clamp_cursor();
                // The list is current again; a lingering refresh error or
                // "Refreshing..." notice would lie
                let stale_status = matches!(
                    &self.status,
                    Some(s) if s.kind == StatusKind::RefreshError
                        || (s.kind == StatusKind::Info && s.text == REFRESHING_MSG)
                );
                if stale_status {
                    self.status = None;
                }
                self.dirty = true;
            }
            AppUpdate::RefreshFailed { seq, message } => {
                if seq <= self.last_applied_seq {
                    return;
                }
                // Stale-but-valid display beats a blanked one: registry kept
                self.set_status(StatusKind::RefreshError, format!("Refresh failed: {message}"));
            }
            AppUpdate::ActionResult {
                unit,
                action,
                outcome,
            } => {
                self.action_pending = false;
                let (kind, text) = action_result_status(&unit, action, &outcome);
                self.set_status(kind, text);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a per-error-kind message for a finished action.
fn action_result_status(
    unit: &str,
    action: UnitAction,
    outcome: &Result<(), GatewayError>,
) -> (StatusKind, String) {
    match outcome {
        Ok(()) => (
            StatusKind::Info,
            format!("{} {unit}", capitalize(action.past_tense())),
        ),
        Err(GatewayError::UnitNotFound(_)) => (
            StatusKind::ActionError,
            format!("Unit {unit} not found - it may have been removed"),
        ),
        Err(GatewayError::PermissionDenied(_)) => (
            StatusKind::ActionError,
            format!("Permission denied: cannot {} {unit}", action.verb()),
        ),
        Err(GatewayError::ManagerUnavailable(msg)) => (
            StatusKind::ActionError,
            format!("Service manager unreachable: {msg}"),
        ),
        Err(e) => (
            StatusKind::ActionError,
            format!("Failed to {} {unit}: {e}", action.verb()),
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
