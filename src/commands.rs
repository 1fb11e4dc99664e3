//! CLI commands
//!
//! One-shot commands that talk to the service manager directly and print to
//! stdout. The interactive session lives in [`crate::tui`]; these exist for
//! scripting and quick checks.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use tracing::info;

use crate::style::SdtuiStyle;
use crate::systemd::{Gateway, UnitAction};

/// List all service units.
///
/// # Errors
/// Returns an error if the unit query fails or JSON serialization fails.
pub fn list_units(gateway: &dyn Gateway, json_output: bool) -> Result<()> {
    let units = gateway
        .list_units()
        .context("Failed to query units from systemd")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    println!("{}", "UNITS:".header());
    println!("{}", "-".repeat(6));
    if units.is_empty() {
        println!("  {}", "(none)".dim());
        return Ok(());
    }

    let name_width = units.iter().map(|u| u.name.len()).max().unwrap_or(0);
    for unit in &units {
        // Pad before styling: ANSI escapes would throw off format widths
        let name = format!("{:<name_width$}", unit.name);
        let state = format!("{:<10}", unit.active_state);
        let state = if unit.is_active() {
            state.success()
        } else if unit.is_failed() {
            state.error()
        } else {
            state.dim()
        };
        println!(
            "  {}  {} {} ({})",
            name.bold(),
            state,
            unit.description,
            unit.sub_state.as_str().dim(),
        );
    }
    println!(
        "\n{} units total",
        units.len().to_string().as_str().technical()
    );

    Ok(())
}

/// Run a control action against one unit and report the outcome.
///
/// # Errors
/// Returns an error carrying the gateway's failure kind, so the exit
/// message distinguishes permission problems from unknown units.
pub fn control(gateway: &dyn Gateway, unit: &str, action: UnitAction) -> Result<()> {
    info!("Running systemctl {} {}", action.verb(), unit);
    gateway
        .control(unit, action)
        .with_context(|| format!("Failed to {} {unit}", action.verb()))?;

    println!("{} {}", action.past_tense().success(), unit.bold());
    Ok(())
}
