//! Keyboard input.
//!
//! Terminal key events are reduced to the small set of keys the screens
//! react to. Everything else is dropped at the boundary.

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};

/// A key press the application understands.
///
/// # Example
///
/// ```rust
/// use classroom::key::Key;
///
/// let keys: Vec<Key> = Key::typed("hi").collect();
/// assert_eq!(keys, vec![Key::Char('h'), Key::Char('i')]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    /// Shift+Tab.
    BackTab,
    Esc,
    Up,
    Down,
    Left,
    Right,
    CtrlLeft,
    CtrlRight,
    /// Ctrl+N.
    CtrlN,
    /// Ctrl+C.
    CtrlC,
    /// Function key F1..F12.
    F(u8),
}

impl Key {
    /// Returns one `Char` key per character of `text`.
    pub fn typed(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().map(Self::Char)
    }

    /// Returns true for printable characters.
    #[must_use]
    pub const fn is_char(self) -> bool {
        matches!(self, Self::Char(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Enter => f.write_str("enter"),
            Self::Backspace => f.write_str("backspace"),
            Self::Delete => f.write_str("delete"),
            Self::Tab => f.write_str("tab"),
            Self::BackTab => f.write_str("shift+tab"),
            Self::Esc => f.write_str("esc"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::CtrlLeft => f.write_str("ctrl+left"),
            Self::CtrlRight => f.write_str("ctrl+right"),
            Self::CtrlN => f.write_str("ctrl+n"),
            Self::CtrlC => f.write_str("ctrl+c"),
            Self::F(n) => write!(f, "f{n}"),
        }
    }
}

/// Converts a crossterm key event. Returns `None` for keys with no meaning here.
#[must_use]
pub fn from_crossterm_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    let key = match code {
        KeyCode::Char('c' | 'C') if ctrl => Key::CtrlC,
        KeyCode::Char('n' | 'N') if ctrl => Key::CtrlN,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab if shift => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left if ctrl => Key::CtrlLeft,
        KeyCode::Left => Key::Left,
        KeyCode::Right if ctrl => Key::CtrlRight,
        KeyCode::Right => Key::Right,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}
