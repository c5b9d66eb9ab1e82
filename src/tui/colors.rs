//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Background of search hits.
pub const HIGHLIGHT: Color = Color::Rgb(255, 215, 0);
/// Foreground on top of `HIGHLIGHT`.
pub const HIGHLIGHT_TEXT: Color = Color::Rgb(20, 20, 20);
/// Completed tasks.
pub const DONE: Color = Color::Rgb(0, 120, 0);
/// Progress gauge fill.
pub const PROGRESS: Color = Color::Rgb(0, 80, 160);
/// Border of the focused pane.
pub const FOCUS: Color = Color::Cyan;
