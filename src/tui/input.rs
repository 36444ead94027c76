//! Line-oriented prompting over any reader/writer pair.

use std::io::{BufRead, Write};

use crate::tui::app::AppError;

/// Reads trimmed lines from `input` after writing prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    pub output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line, trimmed of surrounding whitespace.
    ///
    /// Returns [`AppError::InputClosed`] at end of input.
    pub fn read_line(&mut self) -> Result<String, AppError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    /// Write `prompt` without a newline, flush, then read a line.
    pub fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        self.print(prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Write `text` as is.
    pub fn print(&mut self, text: &str) -> Result<(), AppError> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Parse a priority, falling back to 0 for anything that is not an integer.
pub fn parse_priority(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

/// Parse a list index; `None` when it is not a non-negative integer below `len`.
pub fn parse_index(s: &str, len: usize) -> Option<usize> {
    s.trim().parse::<usize>().ok().filter(|&i| i < len)
}

/// Only a case-insensitive `y` counts as yes.
pub fn parse_yes(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("y")
}
