//! Background worker: refresh scheduling and action dispatch
//!
//! All gateway I/O happens here, off the input-handling path, so a slow or
//! hung `systemctl` never freezes cursor movement or search typing. Results
//! travel back to the UI task as [`AppUpdate`] messages; the worker never
//! touches session state directly.

use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, warn};

use super::app::{AppUpdate, BgCommand};
use crate::systemd::{Gateway, GatewayError};

/// Cadence of the periodic full re-query.
pub(crate) const REFRESH_INTERVAL: Duration = Duration::from_millis(2500);

/// Run the worker until the command channel closes.
///
/// Refreshes are serialized through this single loop, so at most one is in
/// flight; triggers that arrive while one runs are drained from the channel
/// and coalesce into at most one follow-up. Every snapshot carries a
/// sequence number so the UI can discard stale results.
pub(crate) async fn run_worker(
    gateway: Arc<dyn Gateway>,
    refresh_interval: Duration,
    mut cmd_rx: Receiver<BgCommand>,
    update_tx: UnboundedSender<AppUpdate>,
) {
    let mut seq: u64 = 0;
    let mut ticker = interval(refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let mut want_refresh = false;
        let mut pending = Vec::new();

        // The first tick fires immediately, giving the initial refresh
        tokio::select! {
            _ = ticker.tick() => want_refresh = true,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => pending.push(cmd),
                None => break,
            }
        }

        // Drain everything queued behind the wake-up: refresh triggers
        // collapse into one, actions run in arrival order.
        while let Ok(cmd) = cmd_rx.try_recv() {
            pending.push(cmd);
        }

        for cmd in pending {
            match cmd {
                BgCommand::Refresh => want_refresh = true,
                BgCommand::Control { action, unit } => {
                    let g = Arc::clone(&gateway);
                    let target = unit.clone();
                    let outcome =
                        tokio::task::spawn_blocking(move || g.control(&target, action))
                            .await
                            .unwrap_or_else(|e| {
                                Err(GatewayError::CommandFailed(format!(
                                    "control task panicked: {e}"
                                )))
                            });
                    if let Err(ref e) = outcome {
                        warn!("{} {} failed: {e}", action.verb(), unit);
                    }
                    let _ = update_tx.send(AppUpdate::ActionResult {
                        unit,
                        action,
                        outcome,
                    });
                    // Displayed state must reflect reality, not an assumed
                    // post-condition: always refresh after an action
                    want_refresh = true;
                }
            }
        }

        if want_refresh {
            seq += 1;
            let g = Arc::clone(&gateway);
            let result = tokio::task::spawn_blocking(move || g.list_units())
                .await
                .unwrap_or_else(|e| {
                    Err(GatewayError::QueryFailed(format!("query task panicked: {e}")))
                });
            let update = match result {
                Ok(units) => {
                    debug!("refresh #{seq}: {} units", units.len());
                    AppUpdate::Snapshot { seq, units }
                }
                Err(e) => AppUpdate::RefreshFailed {
                    seq,
                    message: e.to_string(),
                },
            };
            if update_tx.send(update).is_err() {
                break;
            }
            // An on-demand refresh restarts the periodic clock
            ticker.reset();
        }
    }
}
