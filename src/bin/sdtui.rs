//! sdtui binary entry point
//!
//! Dispatches to the TUI or a one-shot subcommand based on CLI arguments.

use anyhow::Result;
use clap::Parser;
use sdtui::{Args, SystemdGateway, UnitAction, cli::Command, commands};

/// Initialize logging
///
/// - For CLI commands: log to stderr via `tracing_subscriber`.
/// - For TUI mode: route tracing events into tui-logger's buffer so nothing
///   is written to the raw-mode terminal.
fn init_logging(tui_mode: bool) {
    if tui_mode {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;
        use tui_logger::TuiTracingSubscriberLayer;

        tracing_subscriber::registry()
            .with(TuiTracingSubscriberLayer)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for panic handling
    color_eyre::install().expect("Failed to install color_eyre");

    let args = Args::parse();
    let gateway = SystemdGateway::new(args.user);

    match args.command {
        // No subcommand: open the TUI
        None | Some(Command::Tui) => {
            init_logging(true);
            sdtui::tui::run(args.user).await
        }

        Some(Command::List { json }) => {
            init_logging(false);
            commands::list_units(&gateway, json)
        }

        Some(Command::Start { unit }) => {
            init_logging(false);
            commands::control(&gateway, &unit, UnitAction::Start)
        }

        Some(Command::Stop { unit }) => {
            init_logging(false);
            commands::control(&gateway, &unit, UnitAction::Stop)
        }

        Some(Command::Restart { unit }) => {
            init_logging(false);
            commands::control(&gateway, &unit, UnitAction::Restart)
        }

        Some(Command::Enable { unit }) => {
            init_logging(false);
            commands::control(&gateway, &unit, UnitAction::Enable)
        }

        Some(Command::Disable { unit }) => {
            init_logging(false);
            commands::control(&gateway, &unit, UnitAction::Disable)
        }
    }
}
