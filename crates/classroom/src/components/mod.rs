//! Reusable screen parts.

mod form_view;
mod record_list;

pub use form_view::{FormEvent, FormView};
pub use record_list::{ListEvent, RecordListView, RowFn};

/// Which region of a form-over-list screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    List,
}

/// Selected row of a list, kept inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCursor {
    selected: usize,
}

impl ListCursor {
    /// Returns the selected row.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Moves up one row, stopping at the top.
    pub const fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves down one row, stopping at the last of `len` rows.
    pub const fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Pulls the selection back inside `len` rows after a removal.
    pub const fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Jumps to the first row.
    pub const fn reset(&mut self) {
        self.selected = 0;
    }
}
