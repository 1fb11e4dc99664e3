//! Command-line interface definitions
//!
//! Uses clap for argument parsing with derive macros.

use clap::{Parser, Subcommand};

/// sdtui - systemd unit TUI
///
/// Browse, search, and control systemd units from the terminal.
#[derive(Parser)]
#[command(name = "sdtui")]
#[command(version)]
#[command(about = "Interactive terminal manager for systemd units")]
#[command(after_help = "\
BEHAVIOR:
  - With no subcommand, opens the interactive TUI
  - The unit list refreshes every few seconds and after every action
  - Actions run `systemctl <verb> <unit>` and may require privileges
  - Search ('/') filters the list by unit name, case-insensitive

ONE-SHOT COMMANDS:
  sdtui list               Print all service units (add --json for machines)
  sdtui start UNIT         Start a unit
  sdtui stop UNIT          Stop a unit
  sdtui restart UNIT       Restart a unit
  sdtui enable UNIT        Enable a unit (start on boot/login)
  sdtui disable UNIT       Disable a unit

SYSTEMD INTEGRATION:
  Uses `systemctl list-units` for queries and `systemctl <verb>` for control.
  Pass --user to target the per-user service manager instead of the system one.")]
pub struct Args {
    /// Target the per-user service manager (systemctl --user)
    #[arg(long, global = true)]
    pub user: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive TUI (default when no subcommand is given)
    Tui,

    /// Print all service units
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Start a unit
    Start { unit: String },

    /// Stop a unit
    Stop { unit: String },

    /// Restart a unit
    Restart { unit: String },

    /// Enable a unit (start on boot/login)
    Enable { unit: String },

    /// Disable a unit
    Disable { unit: String },
}
