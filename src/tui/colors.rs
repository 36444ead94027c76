//! Color constants for the terminal view.

use crossterm::style::Color;

// Pastel truecolor palette for the table and menu

/// Category indices and urgent priorities
pub const SOFT_RED: Color = Color::Rgb { r: 255, g: 85, b: 85 };
/// Completed tasks, menu text and relaxed priorities
pub const PASTEL_GREEN: Color = Color::Rgb { r: 80, g: 250, b: 123 };
/// Category names, field labels and mid-range priorities
pub const PASTEL_YELLOW: Color = Color::Rgb { r: 255, g: 184, b: 108 };
/// Column headings
pub const PASTEL_MAGENTA: Color = Color::Rgb { r: 255, g: 121, b: 198 };
/// Rules in the detail view
pub const PASTEL_CYAN: Color = Color::Rgb { r: 139, g: 233, b: 253 };
/// Open task text
pub const NEAR_WHITE: Color = Color::Rgb { r: 248, g: 248, b: 242 };
/// Links
pub const LINK_GREY: Color = Color::DarkGrey;
/// Background behind separators
pub const RULE_BACKGROUND: Color = Color::Black;
