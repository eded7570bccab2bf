//! Keyboard-driven form bound to a [`FormController`].

use recordbook::{FieldKind, FieldSpec, FormController, Record, RecordSink, Schema, SubmitOutcome};
use tracing::debug;

use crate::key::Key;
use crate::theme::{Theme, pad_right, spacing};

/// What a key did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The key has no meaning for the focused field.
    Ignored,
    /// The focused field's value changed.
    Edited,
    /// Enter was pressed and the draft was submitted.
    Submitted(SubmitOutcome),
    /// Esc discarded the draft (and left edit mode).
    Cancelled,
}

/// Renders a schema's fields one per line and routes keys to the focused one.
///
/// Typing edits text fields; Left/Right cycle choice fields; Enter submits;
/// Esc cancels. Moving focus between fields is left to the owning screen
/// through [`FormView::advance`] and [`FormView::retreat`], so it can chain
/// focus into its other regions.
#[derive(Debug, Clone)]
pub struct FormView<R> {
    form: FormController<R>,
    focus: usize,
    submit_label: &'static str,
    edit_label: &'static str,
}

impl<R: Record> FormView<R> {
    /// Creates a form over `schema`. The submit button reads `submit_label`.
    pub fn new(schema: Schema, submit_label: &'static str) -> Self {
        Self {
            form: FormController::new(schema),
            focus: 0,
            submit_label,
            edit_label: "Save changes",
        }
    }

    /// Sets the submit label shown in edit mode.
    #[must_use]
    pub const fn with_edit_label(mut self, label: &'static str) -> Self {
        self.edit_label = label;
        self
    }

    /// Returns the underlying controller.
    pub const fn controller(&self) -> &FormController<R> {
        &self.form
    }

    /// Returns the underlying controller mutably.
    pub const fn controller_mut(&mut self) -> &mut FormController<R> {
        &mut self.form
    }

    /// Index of the focused field.
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// The focused field.
    pub fn focused_field(&self) -> Option<&FieldSpec> {
        self.form.schema().fields().get(self.focus)
    }

    fn field_count(&self) -> usize {
        self.form.schema().fields().len()
    }

    /// Focuses the first field.
    pub const fn focus_first(&mut self) {
        self.focus = 0;
    }

    /// Focuses the last field.
    pub fn focus_last(&mut self) {
        self.focus = self.field_count().saturating_sub(1);
    }

    /// Moves focus to the next field. Returns false (focus unchanged) at the end.
    pub fn advance(&mut self) -> bool {
        if self.focus + 1 < self.field_count() {
            self.focus += 1;
            true
        } else {
            false
        }
    }

    /// Moves focus to the previous field. Returns false (focus unchanged) at the start.
    pub const fn retreat(&mut self) -> bool {
        if self.focus > 0 {
            self.focus -= 1;
            true
        } else {
            false
        }
    }

    /// Loads `record` for editing and focuses the first field.
    pub fn begin_edit(&mut self, index: usize, record: &R) {
        self.form.begin_edit(index, record);
        self.focus = 0;
    }

    /// Handles one key, submitting into `sink` on Enter.
    pub fn handle_key<S: RecordSink<R> + ?Sized>(&mut self, key: Key, sink: &mut S) -> FormEvent {
        let Some(field) = self.focused_field() else {
            return FormEvent::Ignored;
        };
        let name = field.name;
        let is_choice = matches!(field.kind, FieldKind::Choice(_));

        match key {
            Key::Char(c) if !is_choice => {
                let mut value = self.form.value(name).to_string();
                value.push(c);
                self.form.set_value(name, value);
                FormEvent::Edited
            }
            Key::Backspace if !is_choice => {
                let mut value = self.form.value(name).to_string();
                if value.pop().is_none() {
                    return FormEvent::Ignored;
                }
                self.form.set_value(name, value);
                FormEvent::Edited
            }
            Key::Left | Key::Right if is_choice => {
                let current = self.form.value(name).to_string();
                let Some(next) = field.cycle_choice(&current, key == Key::Right) else {
                    return FormEvent::Ignored;
                };
                self.form.set_value(name, next);
                FormEvent::Edited
            }
            Key::Enter => {
                let outcome = self.form.submit(sink);
                match &outcome {
                    SubmitOutcome::Rejected(errors) => {
                        // Jump to the first invalid field in schema order.
                        if let Some(pos) = self
                            .form
                            .schema()
                            .fields()
                            .iter()
                            .position(|f| errors.contains_key(f.name))
                        {
                            self.focus = pos;
                        }
                    }
                    _ => self.focus = 0,
                }
                FormEvent::Submitted(outcome)
            }
            Key::Esc => {
                debug!(editing = ?self.form.editing_index(), "form cancelled");
                self.form.cancel();
                self.focus = 0;
                FormEvent::Cancelled
            }
            _ => FormEvent::Ignored,
        }
    }

    /// Renders the fields, their errors and the submit line.
    ///
    /// The focus marker is only drawn when `active`.
    pub fn view(&self, theme: &Theme, active: bool) -> String {
        let mut lines = Vec::new();
        let indent = " ".repeat(spacing::INDENT);

        for (i, field) in self.form.schema().fields().iter().enumerate() {
            let focused = active && i == self.focus;
            let marker = if focused { "> " } else { "  " };
            let mut label = field.label.clone();
            if field.is_required() {
                label.push_str(" *");
            }
            let label = pad_right(&format!("{label}:"), spacing::LABEL_WIDTH);
            let value = render_value(field, self.form.value(field.name), focused, theme);
            let line = format!("{marker}{label}{value}");
            lines.push(if focused { theme.strong(&line) } else { line });

            if let Some(message) = self.form.error(field.name) {
                lines.push(format!(
                    "{indent}{}{}",
                    " ".repeat(spacing::LABEL_WIDTH),
                    theme.error(&format!("! {message}"))
                ));
            }
        }

        let button = if self.form.is_editing() {
            self.edit_label
        } else {
            self.submit_label
        };
        let mut submit = format!("{indent}[ {button} ]  {}", theme.muted("enter"));
        if self.form.is_editing() {
            submit.push_str(&format!("  {}", theme.muted("esc cancel")));
        }
        lines.push(submit);

        lines.join("\n")
    }
}

fn render_value(field: &FieldSpec, value: &str, focused: bool, theme: &Theme) -> String {
    match &field.kind {
        FieldKind::Choice(_) => {
            let label = field.choice_label(value);
            if focused {
                format!("< {label} >")
            } else {
                label.to_string()
            }
        }
        FieldKind::Date if value.is_empty() && !focused => theme.muted("YYYY-MM-DD"),
        _ if focused => format!("{value}_"),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordbook::RecordStore;
    use recordbook::records::{Task, task_validated_schema};

    fn form() -> FormView<Task> {
        FormView::new(task_validated_schema(), "Add")
    }

    fn type_text(view: &mut FormView<Task>, store: &mut RecordStore<Task>, text: &str) {
        for key in Key::typed(text) {
            view.handle_key(key, store);
        }
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut view = form();
        let mut store = RecordStore::new();
        type_text(&mut view, &mut store, "read");
        assert_eq!(view.handle_key(Key::Backspace, &mut store), FormEvent::Edited);
        assert_eq!(view.controller().value("title"), "rea");
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut view = form();
        let mut store = RecordStore::new();
        assert_eq!(view.handle_key(Key::Backspace, &mut store), FormEvent::Ignored);
    }

    #[test]
    fn test_choice_cycles_with_arrows_and_ignores_typing() {
        let mut view = form();
        let mut store = RecordStore::new();
        assert!(view.advance());
        assert_eq!(view.focused_field().unwrap().name, "category");

        assert_eq!(view.handle_key(Key::Char('x'), &mut store), FormEvent::Ignored);
        view.handle_key(Key::Right, &mut store);
        assert_eq!(view.controller().value("category"), "study");
        view.handle_key(Key::Left, &mut store);
        view.handle_key(Key::Left, &mut store);
        assert_eq!(view.controller().value("category"), "other");
    }

    #[test]
    fn test_advance_and_retreat_stop_at_edges() {
        let mut view = form();
        assert!(!view.retreat());
        assert!(view.advance());
        assert!(view.advance());
        assert!(!view.advance());
        assert_eq!(view.focus(), 2);
        view.focus_first();
        assert_eq!(view.focus(), 0);
        view.focus_last();
        assert_eq!(view.focus(), 2);
    }

    #[test]
    fn test_rejected_submit_focuses_first_invalid() {
        let mut view = form();
        let mut store = RecordStore::new();
        type_text(&mut view, &mut store, "essay");
        view.focus_last();
        type_text(&mut view, &mut store, "tomorrow");

        let event = view.handle_key(Key::Enter, &mut store);
        assert!(matches!(event, FormEvent::Submitted(SubmitOutcome::Rejected(_))));
        assert_eq!(view.focus(), 2);
        assert!(store.is_empty());

        let text = view.view(&Theme::plain(), true);
        assert!(text.contains("! Invalid date format (YYYY-MM-DD)"));
    }

    #[test]
    fn test_successful_submit_resets_focus() {
        let mut view = form();
        let mut store = RecordStore::new();
        type_text(&mut view, &mut store, "essay");
        view.advance();

        let event = view.handle_key(Key::Enter, &mut store);
        assert_eq!(event, FormEvent::Submitted(SubmitOutcome::Created(0)));
        assert_eq!(view.focus(), 0);
        assert_eq!(store.records()[0].title, "essay");
    }

    #[test]
    fn test_view_shows_labels_and_markers() {
        let view = form();
        let text = view.view(&Theme::plain(), true);
        assert!(text.contains("> Task *:"));
        assert!(text.contains("Category:"));
        assert!(text.contains("Pick a category"));
        assert!(text.contains("[ Add ]"));
        assert!(!text.contains("esc cancel"));

        let inactive = view.view(&Theme::plain(), false);
        assert!(!inactive.contains("> "));
    }

    #[test]
    fn test_edit_mode_label() {
        let mut view = form().with_edit_label("Save task");
        view.begin_edit(
            3,
            &Task {
                title: "x".into(),
                ..Task::default()
            },
        );
        let text = view.view(&Theme::plain(), true);
        assert!(text.contains("[ Save task ]"));
        assert!(text.contains("esc cancel"));
    }
}
