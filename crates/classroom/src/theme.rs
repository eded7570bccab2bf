//! Text styling.
//!
//! All colors go through [`Theme`] so that `--no-color` (and `NO_COLOR`)
//! produce plain text from the same render code.

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

/// Layout constants.
pub mod spacing {
    /// Columns used for field labels in forms.
    pub const LABEL_WIDTH: usize = 20;
    /// Indent for list rows and form fields.
    pub const INDENT: usize = 2;
}

/// Semantic styles, or plain text when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Theme {
    /// Creates a theme.
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// Creates a theme that never emits escape codes.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    /// Returns true if escape codes are emitted.
    #[must_use]
    pub const fn uses_color(&self) -> bool {
        self.color
    }

    /// Screen titles.
    #[must_use]
    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.bold().with(Color::Cyan).to_string()
        } else {
            text.to_string()
        }
    }

    /// The active tab and the selected list row.
    #[must_use]
    pub fn selected(&self, text: &str) -> String {
        if self.color {
            text.bold().reverse().to_string()
        } else {
            text.to_string()
        }
    }

    /// Validation messages and failing grades.
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.with(Color::Red).to_string()
        } else {
            text.to_string()
        }
    }

    /// Confirmations.
    #[must_use]
    pub fn success(&self, text: &str) -> String {
        if self.color {
            text.with(Color::Green).to_string()
        } else {
            text.to_string()
        }
    }

    /// Hints and secondary text.
    #[must_use]
    pub fn muted(&self, text: &str) -> String {
        if self.color {
            text.with(Color::DarkGrey).to_string()
        } else {
            text.to_string()
        }
    }

    /// Record names and other emphasis.
    #[must_use]
    pub fn strong(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Pads `text` with spaces to `width` terminal columns.
///
/// Text already wider than `width` is returned unchanged.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// Visible width of `text`, ignoring ANSI escape sequences.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_str())
}

/// Removes CSI escape sequences.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
