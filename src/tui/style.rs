//! Text styling for the terminal view.
//!
//! Layout code never emits escape sequences itself; it asks a [`Style`] to
//! paint a piece of text in a semantic [`Role`] or wrap it in a hyperlink.
//! [`AnsiStyle`] targets truecolor terminals, [`PlainStyle`] leaves text as is
//! for captured output.

use crossterm::style::{Color, Stylize};

use crate::fields::PriorityBand;
use crate::tui::colors::*;

/// What a piece of text means on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Category index in a header.
    Index,
    /// Category name in a header.
    Title,
    /// Horizontal separators and column bars.
    Rule,
    /// Column headings.
    Heading,
    /// Text of an open task.
    Open,
    /// Text of a completed task, and the check mark.
    Done,
    /// Visible text of a link.
    Link,
    /// Priority cell, coloured by band.
    Priority(PriorityBand),
    /// Menu lines and the menu prompt.
    Menu,
    /// Field labels in the detail view.
    Label,
    /// Rules in the detail view.
    Accent,
}

/// Painting capability used by the renderer.
pub trait Style {
    /// Return `text` styled for `role`.
    fn paint(&self, text: &str, role: Role) -> String;

    /// Return `text` as a link to `url`.
    fn hyperlink(&self, text: &str, url: &str) -> String;
}

/// 24-bit ANSI colors and OSC-8 hyperlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl AnsiStyle {
    fn foreground(role: Role) -> Option<Color> {
        let color = match role {
            Role::Index => SOFT_RED,
            Role::Title | Role::Label => PASTEL_YELLOW,
            Role::Heading => PASTEL_MAGENTA,
            Role::Open => NEAR_WHITE,
            Role::Done | Role::Menu => PASTEL_GREEN,
            Role::Link => LINK_GREY,
            Role::Accent => PASTEL_CYAN,
            Role::Priority(PriorityBand::Urgent) => SOFT_RED,
            Role::Priority(PriorityBand::Caution) => PASTEL_YELLOW,
            Role::Priority(PriorityBand::Normal) => PASTEL_GREEN,
            Role::Rule => return None,
        };
        Some(color)
    }
}

impl Style for AnsiStyle {
    fn paint(&self, text: &str, role: Role) -> String {
        match Self::foreground(role) {
            Some(color) => text.with(color).to_string(),
            None => text.on(RULE_BACKGROUND).to_string(),
        }
    }

    fn hyperlink(&self, text: &str, url: &str) -> String {
        if url.is_empty() {
            return text.to_string();
        }
        format!("\x1b]8;;{url}\x1b\\{text}\x1b]8;;\x1b\\")
    }
}

/// No styling at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl Style for PlainStyle {
    fn paint(&self, text: &str, _role: Role) -> String {
        text.to_string()
    }

    fn hyperlink(&self, text: &str, _url: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_style_is_identity() {
        assert_eq!(PlainStyle.paint("Rust", Role::Done), "Rust");
        assert_eq!(PlainStyle.hyperlink("docs", "https://doc.rust-lang.org"), "docs");
    }

    #[test]
    fn test_ansi_paint_wraps_text_in_truecolor() {
        let painted = AnsiStyle.paint("Rust", Role::Index);
        assert!(painted.contains("38;2;255;85;85"));
        assert!(painted.starts_with("\x1b["));
        assert!(painted.contains("Rust"));
        assert_ne!(painted, "Rust");
    }

    #[test]
    fn test_ansi_rule_uses_background() {
        let painted = AnsiStyle.paint("---", Role::Rule);
        assert!(painted.contains("\x1b[40m") || painted.contains("48;5;0"));
        assert!(painted.contains("---"));
    }

    #[test]
    fn test_hyperlink_targets_full_url() {
        let link = AnsiStyle.hyperlink("rust-lang...", "https://rust-lang.org/learn");
        assert_eq!(
            link,
            "\x1b]8;;https://rust-lang.org/learn\x1b\\rust-lang...\x1b]8;;\x1b\\"
        );
        assert_eq!(AnsiStyle.hyperlink("   ", ""), "   ");
    }
}
