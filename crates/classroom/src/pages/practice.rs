//! Counter and text-size exercise.

use super::{PageModel, heading};
use crate::key::Key;
use crate::messages::Page;
use crate::program::Cmd;
use crate::theme::Theme;

const UNIVERSITY: &str = "CSMJU";
const NOTE: &str = "Exams are over, what a relief";
const STATUS: bool = false;

const INITIAL_SIZE: u32 = 28;
const MIN_SIZE: u32 = 14;
const SIZE_STEP: u32 = 2;

/// A counter that grows a notional heading size along with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticePage {
    count: u32,
    size: u32,
}

impl Default for PracticePage {
    fn default() -> Self {
        Self::new()
    }
}

impl PracticePage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            size: INITIAL_SIZE,
        }
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Heading size in points.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Adds one to the count and grows the size.
    pub const fn increment(&mut self) {
        self.count += 1;
        self.size += SIZE_STEP;
    }

    /// Takes one from the count and shrinks the size, each with a floor.
    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
        self.size = self.size.saturating_sub(SIZE_STEP).max(MIN_SIZE);
    }
}

impl PageModel for PracticePage {
    fn update(&mut self, key: Key) -> Option<Cmd> {
        match key {
            Key::Char('+' | '=') => self.increment(),
            Key::Char('-' | '_') => self.decrement(),
            _ => {}
        }
        None
    }

    fn view(&self, theme: &Theme) -> String {
        let status = if STATUS {
            theme.success("on")
        } else {
            theme.error("off")
        };
        [
            heading(theme, &format!("{UNIVERSITY}  (size {})", self.size)),
            NOTE.to_string(),
            format!("Status: {status}"),
            String::new(),
            format!("Count: {}", theme.strong(&self.count.to_string())),
            String::new(),
            theme.muted("+ add and grow   - remove and shrink"),
        ]
        .join("\n")
    }

    fn page(&self) -> Page {
        Page::Practice
    }

    fn hints(&self) -> &'static str {
        "+ increment  - decrement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let page = PracticePage::new();
        assert_eq!(page.count(), 0);
        assert_eq!(page.size(), 28);
    }

    #[test]
    fn test_increment_grows_size() {
        let mut page = PracticePage::new();
        page.update(Key::Char('+'));
        page.update(Key::Char('+'));
        assert_eq!(page.count(), 2);
        assert_eq!(page.size(), 32);
    }

    #[test]
    fn test_decrement_floors() {
        let mut page = PracticePage::new();
        page.update(Key::Char('-'));
        assert_eq!(page.count(), 0);
        assert_eq!(page.size(), 26);

        for _ in 0..10 {
            page.update(Key::Char('-'));
        }
        assert_eq!(page.count(), 0);
        assert_eq!(page.size(), 14);
    }

    #[test]
    fn test_view_shows_status_off() {
        let page = PracticePage::new();
        let text = page.view(&Theme::plain());
        assert!(text.contains("CSMJU  (size 28)"));
        assert!(text.contains("Status: off"));
        assert!(text.contains("Count: 0"));
    }
}
