//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// List title.
pub const TITLE_BLUE: Color = Color::Rgb(0x89, 0xb4, 0xfa);
/// Selected row and the edit prompt.
pub const ACCENT_PEACH: Color = Color::Rgb(0xfa, 0xb3, 0x87);
/// Completed tasks, placeholder text, and key hints.
pub const MUTED_GRAY: Color = Color::Rgb(0x6c, 0x70, 0x86);
