//! Fixed-width cell layout: measuring, truncating, padding and note wrapping.
//!
//! All widths are terminal cells as reported by `unicode-width`, so wide
//! characters take two columns and combining marks take none.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NAME_WIDTH: usize = 12;
/// Full width of the URL column.
pub const URL_WIDTH: usize = 30;
/// Visible URL text before padding; the rest of the column is blank.
pub const URL_TEXT_WIDTH: usize = 27;
pub const PRIORITY_WIDTH: usize = 3;
pub const NOTE_WIDTH: usize = 30;
/// Length of the horizontal rules around a category.
pub const RULE_WIDTH: usize = 90;

const ELLIPSIS: &str = "...";

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `max_cells`.
fn take_cells(s: &str, max_cells: usize) -> &str {
    let mut width = 0;
    for (i, c) in s.char_indices() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw > max_cells {
            return &s[..i];
        }
        width += cw;
    }
    s
}

/// Truncate `s` to `max_cells`, ending in `...` when anything was cut.
///
/// Widths of 3 or less cannot hold an ellipsis and are hard-cut instead.
pub fn truncate_with_dots(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= ELLIPSIS.len() {
        return take_cells(s, max_cells).to_string();
    }
    let mut out = take_cells(s, max_cells - ELLIPSIS.len()).to_string();
    out.push_str(ELLIPSIS);
    out
}

/// Right-pad `s` with spaces up to `width` cells. Wider input is returned as is.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - w);
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width - w));
    out
}

/// Truncate then pad, producing a cell exactly `width` cells wide.
pub fn fit(s: &str, width: usize) -> String {
    pad_right(&truncate_with_dots(s, width), width)
}

/// Greedy word wrap for the note column.
///
/// Words are packed onto a line while `line + " " + word` still fits in
/// `width`. Whitespace runs collapse to single spaces. A word wider than
/// `width` goes on its own line, truncated with an ellipsis; words are never
/// split across lines. An empty note yields one empty line. Lines are not padded.
pub fn wrap_note(note: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in note.split_whitespace() {
        let word_width = display_width(word);
        if line.is_empty() {
            line = truncate_with_dots(word, width);
        } else if display_width(&line) + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = truncate_with_dots(word, width);
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
