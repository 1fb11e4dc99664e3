//! Service manager gateway
//!
//! Sole point of contact with systemd. Queries go through
//! `systemctl list-units`, control commands through `systemctl <verb>`.
//! Everything above this module sees structured [`UnitRecord`]s and typed
//! [`GatewayError`]s, never raw command output - which keeps the whole
//! session core testable against a fake gateway.

use std::process::Command;

use thiserror::Error;
use tracing::{debug, trace};

use crate::registry::UnitRecord;

/// Control actions the gateway can issue for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitAction {
    Start,
    Stop,
    Restart,
    Enable,
    Disable,
}

impl UnitAction {
    /// The systemctl verb for this action.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            UnitAction::Start => "start",
            UnitAction::Stop => "stop",
            UnitAction::Restart => "restart",
            UnitAction::Enable => "enable",
            UnitAction::Disable => "disable",
        }
    }

    /// Past tense for result messages ("started sshd.service").
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            UnitAction::Start => "started",
            UnitAction::Stop => "stopped",
            UnitAction::Restart => "restarted",
            UnitAction::Enable => "enabled",
            UnitAction::Disable => "disabled",
        }
    }
}

/// Failures at the service-manager boundary.
///
/// The kinds are deliberately distinguishable so the dispatcher can render
/// a different message per kind instead of one opaque "command failed".
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The unit query failed or returned output we could not parse.
    /// An unparsable listing is a full failure, never a partial list.
    #[error("unit query failed: {0}")]
    QueryFailed(String),

    /// The manager refused the operation for lack of privileges.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The named unit does not exist on this host.
    #[error("unit not found: {0}")]
    UnitNotFound(String),

    /// The service manager itself cannot be reached (no bus, no binary).
    #[error("service manager unavailable: {0}")]
    ManagerUnavailable(String),

    /// A control command failed for a reason that fits no other kind
    /// (e.g. a job that timed out or a dependency failure).
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// Narrow contract for talking to the service manager.
///
/// Both methods block on external I/O; callers on the UI path must run them
/// through `spawn_blocking` so a hung `systemctl` never freezes input.
pub trait Gateway: Send + Sync {
    /// Query all known service units, in manager-reported order.
    ///
    /// # Errors
    /// Returns [`GatewayError::QueryFailed`] on malformed output and
    /// [`GatewayError::ManagerUnavailable`] if systemd cannot be reached.
    fn list_units(&self) -> Result<Vec<UnitRecord>, GatewayError>;

    /// Issue a control command for one unit. Changes live system state but
    /// never touches the registry; callers refresh afterwards.
    ///
    /// # Errors
    /// Returns a [`GatewayError`] kind matching the failure cause.
    fn control(&self, unit: &str, action: UnitAction) -> Result<(), GatewayError>;
}

/// Gateway implementation backed by the `systemctl` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemdGateway {
    /// Target the per-user manager (`systemctl --user`) instead of the
    /// system one.
    user: bool,
}

impl SystemdGateway {
    #[must_use]
    pub fn new(user: bool) -> Self {
        Self { user }
    }

    fn systemctl(&self) -> Command {
        let mut cmd = Command::new("systemctl");
        if self.user {
            cmd.arg("--user");
        }
        cmd
    }
}

impl Gateway for SystemdGateway {
    fn list_units(&self) -> Result<Vec<UnitRecord>, GatewayError> {
        let output = self
            .systemctl()
            .args([
                "list-units",
                "--type=service",
                "--all",
                "--plain",
                "--no-legend",
                "--no-pager",
                "--full",
            ])
            .output()
            .map_err(|e| {
                GatewayError::ManagerUnavailable(format!("failed to run systemctl: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_query_failure(stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let units = parse_list_output(&stdout)?;
        trace!("systemctl reported {} units", units.len());
        Ok(units)
    }

    fn control(&self, unit: &str, action: UnitAction) -> Result<(), GatewayError> {
        let output = self
            .systemctl()
            .args([action.verb(), unit])
            .output()
            .map_err(|e| {
                GatewayError::ManagerUnavailable(format!("failed to run systemctl: {e}"))
            })?;

        if output.status.success() {
            debug!("systemctl {} {} succeeded", action.verb(), unit);
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(classify_control_failure(unit, stderr.trim()))
    }
}

/// Parse `systemctl list-units --plain --no-legend` output.
///
/// Each line carries five whitespace-separated columns: unit, load, active,
/// sub, and a description spanning the rest of the line. A line missing the
/// four status columns fails the whole call - a corrupt listing must never
/// be passed off as a shorter valid one.
pub(crate) fn parse_list_output(stdout: &str) -> Result<Vec<UnitRecord>, GatewayError> {
    let mut units = Vec::new();
    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        units.push(parse_line(line)?);
    }
    Ok(units)
}

fn parse_line(line: &str) -> Result<UnitRecord, GatewayError> {
    let mut rest = line;
    let mut field = || -> Option<String> { next_field(&mut rest).map(str::to_string) };

    let (Some(name), Some(load_state), Some(active_state), Some(sub_state)) =
        (field(), field(), field(), field())
    else {
        return Err(GatewayError::QueryFailed(format!(
            "malformed list-units line: {line:?}"
        )));
    };

    Ok(UnitRecord {
        name,
        load_state,
        active_state,
        sub_state,
        description: rest.trim().to_string(),
    })
}

/// Split the next whitespace-delimited word off the front of `rest`.
fn next_field<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let s = rest.trim_start();
    if s.is_empty() {
        *rest = s;
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => {
            let (word, tail) = s.split_at(end);
            *rest = tail;
            Some(word)
        }
        None => {
            *rest = "";
            Some(s)
        }
    }
}

fn classify_query_failure(stderr: &str) -> GatewayError {
    let lower = stderr.to_lowercase();
    if lower.contains("failed to connect to bus") || lower.contains("connection refused") {
        GatewayError::ManagerUnavailable(stderr.to_string())
    } else {
        GatewayError::QueryFailed(stderr.to_string())
    }
}

/// Map a failed `systemctl <verb>` to a distinguishable error kind based on
/// the messages systemd actually emits.
pub(crate) fn classify_control_failure(unit: &str, stderr: &str) -> GatewayError {
    let lower = stderr.to_lowercase();
    if lower.contains("access denied")
        || lower.contains("permission denied")
        || lower.contains("authentication required")
        || lower.contains("interactive authentication")
    {
        GatewayError::PermissionDenied(stderr.to_string())
    } else if lower.contains("not found") || lower.contains("not loaded") {
        GatewayError::UnitNotFound(unit.to_string())
    } else if lower.contains("failed to connect to bus") || lower.contains("connection refused") {
        GatewayError::ManagerUnavailable(stderr.to_string())
    } else {
        GatewayError::CommandFailed(stderr.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn parses_well_formed_listing_in_order() {
        let out = "\
sshd.service      loaded active   running OpenSSH server daemon
cron.service      loaded inactive dead    Regular background program processing daemon
smartd.service    loaded failed   failed  Self Monitoring and Reporting Technology
";
        let units = parse_list_output(out).unwrap();
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].name, "sshd.service");
        assert_eq!(units[0].active_state, "active");
        assert_eq!(units[0].sub_state, "running");
        assert_eq!(units[0].description, "OpenSSH server daemon");
        assert_eq!(units[2].active_state, "failed");
        let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["sshd.service", "cron.service", "smartd.service"]);
    }

    #[test]
    fn description_keeps_internal_whitespace() {
        let out = "a.service loaded active running Does  double  spaced   things\n";
        let units = parse_list_output(out).unwrap();
        assert_eq!(units[0].description, "Does  double  spaced   things");
    }

    #[test]
    fn empty_description_is_allowed() {
        let out = "a.service loaded active running\n";
        let units = parse_list_output(out).unwrap();
        assert_eq!(units[0].description, "");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let out = "\n  \na.service loaded active running Something\n\n";
        assert_eq!(parse_list_output(out).unwrap().len(), 1);
    }

    #[test]
    fn malformed_line_fails_the_whole_call() {
        // One bad line in the middle must not yield a shorter "valid" list
        let out = "\
a.service loaded active running OK
broken line
b.service loaded active running Also OK
";
        let err = parse_list_output(out).unwrap_err();
        assert!(matches!(err, GatewayError::QueryFailed(_)), "got {err:?}");
    }

    #[test]
    fn empty_output_is_an_empty_list() {
        assert!(parse_list_output("").unwrap().is_empty());
    }

    #[test_case("Access denied", "perm")]
    #[test_case("Interactive authentication required.", "perm")]
    #[test_case("Unit nope.service not found.", "notfound")]
    #[test_case("Unit nope.service not loaded.", "notfound")]
    #[test_case("Failed to connect to bus: No such file or directory", "unavailable")]
    #[test_case("Job for x.service failed because a timeout was exceeded.", "other")]
    fn control_failures_are_distinguishable(stderr: &str, expected: &str) {
        let err = classify_control_failure("nope.service", stderr);
        let kind = match err {
            GatewayError::PermissionDenied(_) => "perm",
            GatewayError::UnitNotFound(_) => "notfound",
            GatewayError::ManagerUnavailable(_) => "unavailable",
            GatewayError::CommandFailed(_) => "other",
            GatewayError::QueryFailed(_) => "query",
        };
        assert_eq!(kind, expected);
    }

    #[test]
    fn query_failure_distinguishes_missing_bus() {
        assert!(matches!(
            classify_query_failure("Failed to connect to bus: no medium found"),
            GatewayError::ManagerUnavailable(_)
        ));
        assert!(matches!(
            classify_query_failure("something else went wrong"),
            GatewayError::QueryFailed(_)
        ));
    }

    #[test]
    fn action_verbs_match_systemctl() {
        assert_eq!(UnitAction::Start.verb(), "start");
        assert_eq!(UnitAction::Restart.verb(), "restart");
        assert_eq!(UnitAction::Disable.verb(), "disable");
        assert_eq!(UnitAction::Stop.past_tense(), "stopped");
    }
}
