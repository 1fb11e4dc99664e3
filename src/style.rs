//! Terminal styling utilities
//!
//! One color language for CLI output and the TUI:
//! - Semantic colors for unit state (green/yellow/red)
//! - Cyan for headers and technical identifiers
//! - Dim for secondary information

use crossterm::style::Stylize;

/// Extension trait for consistent sdtui styling of CLI output.
///
/// Use these methods instead of direct color calls so every command renders
/// unit state the same way.
pub trait SdtuiStyle: Stylize {
    /// Style for section headers (cyan bold)
    fn header(self) -> <<Self as Stylize>::Styled as Stylize>::Styled
    where
        Self: Sized,
        <Self as Stylize>::Styled: Stylize,
    {
        self.cyan().bold()
    }

    /// Style for active/running state (green)
    fn success(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.green()
    }

    /// Style for failed state and error messages (red)
    fn error(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.red()
    }

    /// Style for transitional states like "activating" (yellow)
    fn warning(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.yellow()
    }

    /// Style for technical identifiers: unit names, verbs, counts (cyan)
    fn technical(self) -> <Self as Stylize>::Styled
    where
        Self: Sized,
    {
        self.cyan()
    }
}

impl<T: Stylize> SdtuiStyle for T {}

// ============================================================================
// Ratatui TUI Color Helpers
// ============================================================================

/// Semantic color palette for TUI use with ratatui
pub mod colors {
    use ratatui::style::Color;

    /// Color for active units
    pub const STATE_ACTIVE: Color = Color::Green;

    /// Color for failed units
    pub const STATE_FAILED: Color = Color::Red;

    /// Color for transitional states (activating, deactivating, reloading)
    pub const STATE_CHANGING: Color = Color::Yellow;

    /// Color for inactive/dead units
    pub const STATE_INACTIVE: Color = Color::DarkGray;

    /// Color for selected UI elements (cyan, use with bold)
    pub const UI_SELECTED: Color = Color::Cyan;

    /// Background color for the selected list row
    pub const UI_SELECTED_BG: Color = Color::DarkGray;

    /// Color for UI highlights and key hints (cyan)
    pub const UI_HIGHLIGHT: Color = Color::Cyan;

    /// Color for success states (green)
    pub const UI_SUCCESS: Color = Color::Green;

    /// Color for error states (red)
    pub const UI_ERROR: Color = Color::Red;

    /// Color for warning states (yellow)
    pub const UI_WARNING: Color = Color::Yellow;

    /// Color for secondary/dimmed text (gray)
    pub const UI_SECONDARY: Color = Color::Gray;

    /// Color for normal UI text (white)
    pub const UI_TEXT: Color = Color::White;

    /// Pick the display color for a unit's active state.
    #[must_use]
    pub fn active_state_color(active_state: &str) -> Color {
        match active_state {
            "active" => STATE_ACTIVE,
            "failed" => STATE_FAILED,
            "activating" | "deactivating" | "reloading" => STATE_CHANGING,
            _ => STATE_INACTIVE,
        }
    }
}
