//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Status colors follow the web dashboard palette.

/// Pending tasks.
pub const PENDING_BLUE: Color = Color::Rgb(59, 130, 246);
/// Completed tasks.
pub const COMPLETED_GREEN: Color = Color::Rgb(16, 185, 129);
/// Skipped tasks.
pub const SKIPPED_AMBER: Color = Color::Rgb(245, 158, 11);
/// Headings and highlights.
pub const ACCENT_BLUE: Color = Color::Rgb(37, 99, 235);
