//! Screen rendering for the TUI

mod help;
mod units;

pub use help::render_help;
pub use units::render_units;
