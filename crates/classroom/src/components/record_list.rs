//! A form above an in-memory record list.
//!
//! This is the shape shared by the todo screens and the GPA screen: records
//! are only added through the form and removed from the list, immediately.

use recordbook::{Record, RecordStore, Schema, SubmitOutcome};
use tracing::{debug, info};

use super::{Focus, FormEvent, FormView, ListCursor};
use crate::key::Key;
use crate::theme::{Theme, spacing};

/// Renders one record as a list row.
pub type RowFn<R> = fn(&R, &Theme) -> String;

/// What a key did to the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Nothing happened.
    Ignored,
    /// Focus, selection or draft changed.
    Handled,
    /// A record was appended at this index.
    Added(usize),
    /// The record at this index was replaced.
    Updated(usize),
    /// Submit was refused by validation.
    Rejected,
    /// The record at this index was removed.
    Removed(usize),
}

impl ListEvent {
    /// Returns true if the record list changed.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Added(_) | Self::Updated(_) | Self::Removed(_))
    }
}

/// Form, record list and the focus between them.
#[derive(Debug, Clone)]
pub struct RecordListView<R> {
    form: FormView<R>,
    store: RecordStore<R>,
    cursor: ListCursor,
    focus: Focus,
    row: RowFn<R>,
    empty_text: &'static str,
}

impl<R: Record> RecordListView<R> {
    /// Creates an empty list with a form over `schema`.
    pub fn new(schema: Schema, submit_label: &'static str, row: RowFn<R>) -> Self {
        Self {
            form: FormView::new(schema, submit_label),
            store: RecordStore::new(),
            cursor: ListCursor::default(),
            focus: Focus::Form,
            row,
            empty_text: "Nothing here yet.",
        }
    }

    /// Sets the text shown when the list is empty.
    #[must_use]
    pub const fn with_empty_text(mut self, text: &'static str) -> Self {
        self.empty_text = text;
        self
    }

    pub const fn form(&self) -> &FormView<R> {
        &self.form
    }

    pub const fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub const fn focus(&self) -> Focus {
        self.focus
    }

    pub const fn selected(&self) -> usize {
        self.cursor.selected()
    }

    /// Removes the record at `index`, keeping the form's edit target and the
    /// selection consistent.
    pub fn remove_at(&mut self, index: usize) -> Option<R> {
        let removed = self.store.remove_at(index)?;
        self.form.controller_mut().on_removed(index);
        self.cursor.clamp(self.store.len());
        if self.store.is_empty() {
            self.focus = Focus::Form;
        }
        info!(index, remaining = self.store.len(), "record removed");
        Some(removed)
    }

    /// Handles one key.
    pub fn handle_key(&mut self, key: Key) -> ListEvent {
        match (self.focus, key) {
            (Focus::Form, Key::Tab) => {
                if !self.form.advance() && !self.store.is_empty() {
                    self.focus = Focus::List;
                }
                ListEvent::Handled
            }
            (Focus::Form, Key::BackTab) => {
                if !self.form.retreat() && !self.store.is_empty() {
                    self.focus = Focus::List;
                }
                ListEvent::Handled
            }
            (Focus::List, Key::Tab) => {
                self.focus = Focus::Form;
                self.form.focus_first();
                ListEvent::Handled
            }
            (Focus::List, Key::BackTab) => {
                self.focus = Focus::Form;
                self.form.focus_last();
                ListEvent::Handled
            }
            (Focus::Form, key) => self.handle_form_key(key),
            (Focus::List, Key::Up) => {
                self.cursor.up();
                ListEvent::Handled
            }
            (Focus::List, Key::Down) => {
                self.cursor.down(self.store.len());
                ListEvent::Handled
            }
            (Focus::List, Key::Char('d') | Key::Delete) => {
                let index = self.cursor.selected();
                self.remove_at(index)
                    .map_or(ListEvent::Ignored, |_| ListEvent::Removed(index))
            }
            (Focus::List, _) => ListEvent::Ignored,
        }
    }

    fn handle_form_key(&mut self, key: Key) -> ListEvent {
        match self.form.handle_key(key, &mut self.store) {
            FormEvent::Ignored => ListEvent::Ignored,
            FormEvent::Edited | FormEvent::Cancelled => ListEvent::Handled,
            FormEvent::Submitted(outcome) => match outcome {
                SubmitOutcome::Created(index) => {
                    info!(index, "record added");
                    ListEvent::Added(index)
                }
                SubmitOutcome::Updated(index) => {
                    info!(index, "record updated");
                    ListEvent::Updated(index)
                }
                SubmitOutcome::Missing(index) => {
                    debug!(index, "edit target vanished");
                    ListEvent::Handled
                }
                SubmitOutcome::Rejected(errors) => {
                    debug!(fields = ?errors.keys().collect::<Vec<_>>(), "submit rejected");
                    ListEvent::Rejected
                }
            },
        }
    }

    /// Renders the form, then the rows.
    pub fn view(&self, theme: &Theme) -> String {
        let mut out = self.form.view(theme, self.focus == Focus::Form);
        out.push_str("\n\n");

        let indent = " ".repeat(spacing::INDENT);
        if self.store.is_empty() {
            out.push_str(&format!("{indent}{}", theme.muted(self.empty_text)));
            return out;
        }

        let rows: Vec<String> = self
            .store
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let text = (self.row)(record, theme);
                if self.focus == Focus::List && i == self.cursor.selected() {
                    format!("> {}", theme.selected(&text))
                } else {
                    format!("{indent}{text}")
                }
            })
            .collect();
        out.push_str(&rows.join("\n"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordbook::records::{TodoItem, todo_basic_schema};

    fn todo_row(item: &TodoItem, _theme: &Theme) -> String {
        item.title.clone()
    }

    fn list() -> RecordListView<TodoItem> {
        RecordListView::new(todo_basic_schema(), "Add", todo_row).with_empty_text("No tasks")
    }

    fn add(view: &mut RecordListView<TodoItem>, title: &str) -> ListEvent {
        for key in Key::typed(title) {
            view.handle_key(key);
        }
        view.handle_key(Key::Enter)
    }

    #[test]
    fn test_add_and_render() {
        let mut view = list();
        assert!(view.view(&Theme::plain()).contains("No tasks"));

        assert_eq!(add(&mut view, "  read  "), ListEvent::Added(0));
        assert_eq!(view.store().records()[0].title, "read");
        assert!(view.view(&Theme::plain()).contains("  read"));
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut view = list();
        assert_eq!(add(&mut view, "   "), ListEvent::Rejected);
        assert!(view.store().is_empty());
        assert!(view.view(&Theme::plain()).contains("Please type a task"));
    }

    #[test]
    fn test_tab_to_list_needs_rows() {
        let mut view = list();
        view.handle_key(Key::Tab);
        assert_eq!(view.focus(), Focus::Form);

        add(&mut view, "a");
        view.handle_key(Key::Tab);
        assert_eq!(view.focus(), Focus::List);
        view.handle_key(Key::Tab);
        assert_eq!(view.focus(), Focus::Form);
    }

    #[test]
    fn test_delete_selected_row() {
        let mut view = list();
        add(&mut view, "a");
        add(&mut view, "b");
        add(&mut view, "c");

        view.handle_key(Key::BackTab);
        view.handle_key(Key::Down);
        assert_eq!(view.handle_key(Key::Char('d')), ListEvent::Removed(1));
        let titles: Vec<_> = view.store().records().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);

        view.handle_key(Key::Down);
        assert_eq!(view.handle_key(Key::Delete), ListEvent::Removed(1));
        assert_eq!(view.selected(), 0);
        assert_eq!(view.handle_key(Key::Delete), ListEvent::Removed(0));
        assert_eq!(view.focus(), Focus::Form);
    }

    #[test]
    fn test_selected_row_marker() {
        let mut view = list();
        add(&mut view, "a");
        view.handle_key(Key::Tab);
        let text = view.view(&Theme::plain());
        assert!(text.contains("> a"));
    }
}
