//! Screen identifiers and navigation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The seven screens, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// Counter and text-size exercise.
    #[default]
    Practice,
    /// Title-only todo list.
    TodoBasic,
    /// Todo list with category and due date.
    TodoExtended,
    /// Todo list managed by form registration.
    TodoForm,
    /// Todo list validated by a full rule table.
    TodoValidated,
    /// Course grades and GPA.
    Gpa,
    /// Persisted member directory.
    Directory,
}

impl Page {
    /// Get the display name for this page.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Practice => "Practice",
            Self::TodoBasic => "Todo Basic",
            Self::TodoExtended => "Todo Extended",
            Self::TodoForm => "Todo Form",
            Self::TodoValidated => "Todo Validated",
            Self::Gpa => "GPA",
            Self::Directory => "Directory",
        }
    }

    /// Get the identifier used on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Practice => "practice",
            Self::TodoBasic => "todo-basic",
            Self::TodoExtended => "todo-extended",
            Self::TodoForm => "todo-form",
            Self::TodoValidated => "todo-validated",
            Self::Gpa => "gpa",
            Self::Directory => "directory",
        }
    }

    /// Get the function key number for this page (1-7).
    #[must_use]
    pub const fn shortcut(self) -> u8 {
        match self {
            Self::Practice => 1,
            Self::TodoBasic => 2,
            Self::TodoExtended => 3,
            Self::TodoForm => 4,
            Self::TodoValidated => 5,
            Self::Gpa => 6,
            Self::Directory => 7,
        }
    }

    /// Get page from function key number.
    #[must_use]
    pub const fn from_shortcut(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Practice),
            2 => Some(Self::TodoBasic),
            3 => Some(Self::TodoExtended),
            4 => Some(Self::TodoForm),
            5 => Some(Self::TodoValidated),
            6 => Some(Self::Gpa),
            7 => Some(Self::Directory),
            _ => None,
        }
    }

    /// Get all pages in navigation order.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Practice,
            Self::TodoBasic,
            Self::TodoExtended,
            Self::TodoForm,
            Self::TodoValidated,
            Self::Gpa,
            Self::Directory,
        ]
    }

    /// The page after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// The page before this one, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    fn index(self) -> usize {
        usize::from(self.shortcut() - 1)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown page identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page {0:?} (expected one of: practice, todo-basic, todo-extended, todo-form, todo-validated, gpa, directory)")]
pub struct ParsePageError(String);

impl FromStr for Page {
    type Err = ParsePageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|p| p.slug() == wanted)
            .ok_or_else(|| ParsePageError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_round_trip() {
        for page in Page::all() {
            assert_eq!(Page::from_shortcut(page.shortcut()), Some(page));
        }
        assert_eq!(Page::from_shortcut(0), None);
        assert_eq!(Page::from_shortcut(8), None);
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(Page::Practice.next(), Page::TodoBasic);
        assert_eq!(Page::Directory.next(), Page::Practice);
        assert_eq!(Page::Practice.prev(), Page::Directory);
        assert_eq!(Page::Gpa.prev(), Page::TodoValidated);
    }

    #[test]
    fn test_parse_slug() {
        assert_eq!("gpa".parse::<Page>(), Ok(Page::Gpa));
        assert_eq!(" Todo-Form ".parse::<Page>(), Ok(Page::TodoForm));
        assert!("dashboard".parse::<Page>().is_err());
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&Page::TodoValidated).unwrap();
        assert_eq!(json, r#""todo-validated""#);
    }
}
