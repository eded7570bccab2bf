//! Validated form controller.
//!
//! A [`FormController`] owns a [`Draft`] bound to a [`Schema`]. Front ends
//! feed it input through [`FormController::set_value`] and commit it with
//! [`FormController::submit`], which validates the whole draft at once and,
//! on success, hands the record to a [`RecordSink`].
//!
//! The controller is either in create mode (`editing_index() == None`) or in
//! edit mode, entered through [`FormController::begin_edit`].

use tracing::debug;

use crate::schema::{FieldErrors, Schema};

pub use crate::schema::Values;

/// A record shape that can be built from, and read back into, a draft.
pub trait Record: Clone {
    /// Builds a record from validated, normalized values.
    fn from_values(values: &Values) -> Self;

    /// Reads a field for edit-entry. `None` means the field is absent.
    fn field(&self, name: &str) -> Option<String>;
}

/// Destination for submitted records.
pub trait RecordSink<R> {
    /// Appends a record, returning its index.
    fn append(&mut self, record: R) -> usize;

    /// Replaces the record at `index`. Returns false (and does nothing) when
    /// `index` is out of bounds.
    fn replace_at(&mut self, index: usize, record: R) -> bool;
}

/// Validation progress of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Not changed since the last reset or edit-entry.
    #[default]
    Untouched,
    /// Changed, not yet validated.
    Edited,
    /// Passed the last submit.
    Valid,
    /// Failed the last submit.
    Invalid,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was appended at this index.
    Created(usize),
    /// The record at this index was replaced.
    Updated(usize),
    /// Edit mode targeted an index that no longer exists; nothing changed.
    Missing(usize),
    /// Validation failed; the draft is kept as typed.
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    /// Returns true if the record list was changed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }
}

/// The in-progress record and its per-field validation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    values: Values,
    states: Vec<(&'static str, FieldState)>,
    errors: FieldErrors,
}

impl Draft {
    fn fresh(schema: &Schema, values: Values) -> Self {
        Self {
            values,
            states: schema
                .fields()
                .iter()
                .map(|f| (f.name, FieldState::Untouched))
                .collect(),
            errors: FieldErrors::new(),
        }
    }

    /// Returns the draft values.
    #[must_use]
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Returns the errors from the last submit.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Returns the state of `field`, `Untouched` if unknown.
    #[must_use]
    pub fn state(&self, field: &str) -> FieldState {
        self.states
            .iter()
            .find(|(n, _)| *n == field)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    fn set_state(&mut self, field: &str, state: FieldState) {
        if let Some((_, s)) = self.states.iter_mut().find(|(n, _)| *n == field) {
            *s = state;
        }
    }
}

/// Binds a draft to a schema and commits it to a record list.
#[derive(Debug, Clone)]
pub struct FormController<R> {
    schema: Schema,
    draft: Draft,
    editing: Option<usize>,
    _record: std::marker::PhantomData<fn() -> R>,
}

impl<R: Record> FormController<R> {
    /// Creates a controller in create mode with a default draft.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        let draft = Draft::fresh(&schema, schema.defaults());
        Self {
            schema,
            draft,
            editing: None,
            _record: std::marker::PhantomData,
        }
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the draft.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the current value of `field`.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.draft.values.get(field)
    }

    /// Returns the error message for `field` from the last submit.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.draft.errors.get(field).map(String::as_str)
    }

    /// Returns all errors from the last submit.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.draft.errors
    }

    /// Returns the index being edited, if in edit mode.
    #[must_use]
    pub const fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    /// Returns true in edit mode.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Records user input for `field`. No validation runs.
    ///
    /// Returns false if the schema has no such field.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> bool {
        if !self.draft.values.set(field, value) {
            return false;
        }
        self.draft.set_state(field, FieldState::Edited);
        true
    }

    /// Validates the draft and commits it on success.
    ///
    /// In create mode the record is appended; in edit mode it replaces the
    /// record at the editing index. Either way the draft then resets to its
    /// defaults and the controller returns to create mode. On failure the
    /// draft is left exactly as typed and `sink` is not touched.
    pub fn submit<S: RecordSink<R> + ?Sized>(&mut self, sink: &mut S) -> SubmitOutcome {
        let errors = self.schema.validate(&self.draft.values);
        for field in self.schema.fields() {
            let state = if errors.contains_key(field.name) {
                FieldState::Invalid
            } else {
                FieldState::Valid
            };
            self.draft.set_state(field.name, state);
        }

        if !errors.is_empty() {
            debug!(invalid = errors.len(), "draft rejected");
            self.draft.errors = errors.clone();
            return SubmitOutcome::Rejected(errors);
        }

        let record = R::from_values(&self.schema.normalize(&self.draft.values));
        let outcome = match self.editing {
            None => SubmitOutcome::Created(sink.append(record)),
            Some(index) if sink.replace_at(index, record) => SubmitOutcome::Updated(index),
            Some(index) => SubmitOutcome::Missing(index),
        };
        debug!(?outcome, "draft committed");

        self.reset();
        outcome
    }

    /// Loads `record` into the draft and enters edit mode for `index`.
    ///
    /// Absent fields become empty text. No validation runs.
    pub fn begin_edit(&mut self, index: usize, record: &R) {
        let mut values = self.schema.defaults();
        for field in self.schema.fields() {
            values.set(field.name, record.field(field.name).unwrap_or_default());
        }
        self.draft = Draft::fresh(&self.schema, values);
        self.editing = Some(index);
    }

    /// Discards the draft and leaves edit mode.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Adjusts the editing index after the record at `index` was removed.
    ///
    /// Editing the removed record cancels the edit; editing a later record
    /// follows it down by one.
    pub fn on_removed(&mut self, index: usize) {
        match self.editing {
            Some(i) if i == index => self.cancel(),
            Some(i) if i > index => self.editing = Some(i - 1),
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.draft = Draft::fresh(&self.schema, self.schema.defaults());
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, Rule};
    use crate::store::RecordStore;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        title: String,
        tag: String,
    }

    impl Record for Note {
        fn from_values(values: &Values) -> Self {
            Self {
                title: values.get("title").to_string(),
                tag: values.get("tag").to_string(),
            }
        }

        fn field(&self, name: &str) -> Option<String> {
            match name {
                "title" => Some(self.title.clone()),
                "tag" if !self.tag.is_empty() => Some(self.tag.clone()),
                _ => None,
            }
        }
    }

    fn note(title: &str) -> Note {
        Note {
            title: title.to_string(),
            tag: String::new(),
        }
    }

    fn controller() -> FormController<Note> {
        FormController::new(Schema::new(vec![
            FieldSpec::text("title")
                .trim(true)
                .rule(Rule::required("title required")),
            FieldSpec::text("tag")
                .default_value("misc")
                .rule(Rule::one_of(["misc", "work"], "bad tag")),
        ]))
    }

    #[test]
    fn test_new_draft_has_defaults() {
        let form = controller();
        assert_eq!(form.value("title"), "");
        assert_eq!(form.value("tag"), "misc");
        assert_eq!(form.draft().state("title"), FieldState::Untouched);
        assert!(!form.is_editing());
    }

    #[test]
    fn test_set_value_marks_edited_without_validating() {
        let mut form = controller();
        assert!(form.set_value("tag", "nope"));
        assert_eq!(form.draft().state("tag"), FieldState::Edited);
        assert!(form.errors().is_empty());
        assert!(!form.set_value("missing", "x"));
    }

    #[test]
    fn test_rejected_submit_keeps_draft() {
        let mut form = controller();
        let mut store = RecordStore::new();
        form.set_value("title", "   ");
        form.set_value("tag", "nope");

        let outcome = form.submit(&mut store);
        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(errors.len(), 2);
        assert!(store.is_empty());
        assert_eq!(form.value("title"), "   ");
        assert_eq!(form.value("tag"), "nope");
        assert_eq!(form.error("title"), Some("title required"));
        assert_eq!(form.draft().state("title"), FieldState::Invalid);
    }

    #[test]
    fn test_partial_failure_marks_states() {
        let mut form = controller();
        let mut store = RecordStore::new();
        form.set_value("title", "ok");
        form.set_value("tag", "nope");

        assert!(matches!(form.submit(&mut store), SubmitOutcome::Rejected(_)));
        assert_eq!(form.draft().state("title"), FieldState::Valid);
        assert_eq!(form.draft().state("tag"), FieldState::Invalid);
        assert_eq!(form.error("title"), None);
    }

    #[test]
    fn test_successful_submit_appends_and_resets() {
        let mut form = controller();
        let mut store = RecordStore::from_records(vec![note("first")]);
        form.set_value("title", "  second  ");

        assert_eq!(form.submit(&mut store), SubmitOutcome::Created(1));
        assert_eq!(store.records()[1].title, "second");
        assert_eq!(store.records()[1].tag, "misc");
        assert_eq!(form.value("title"), "");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_errors_clear_after_success() {
        let mut form = controller();
        let mut store = RecordStore::new();
        assert!(!form.submit(&mut store).is_committed());
        assert!(!form.errors().is_empty());

        form.set_value("title", "fixed");
        assert!(form.submit(&mut store).is_committed());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_edit_replaces_only_target() {
        let mut form = controller();
        let mut store = RecordStore::from_records(vec![note("a"), note("b"), note("c")]);

        let record = store.get(1).cloned().unwrap();
        form.begin_edit(1, &record);
        assert_eq!(form.editing_index(), Some(1));
        assert_eq!(form.value("title"), "b");
        // Absent optional field becomes empty text.
        assert_eq!(form.value("tag"), "");

        form.set_value("title", "B");
        assert_eq!(form.submit(&mut store), SubmitOutcome::Updated(1));
        let titles: Vec<_> = store.records().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "B", "c"]);
        assert_eq!(form.editing_index(), None);
    }

    #[test]
    fn test_edit_of_vanished_index_is_noop() {
        let mut form = controller();
        let mut store = RecordStore::from_records(vec![note("a")]);
        form.begin_edit(4, &note("ghost"));

        assert_eq!(form.submit(&mut store), SubmitOutcome::Missing(4));
        assert_eq!(store.len(), 1);
        assert!(!form.is_editing());
    }

    #[test]
    fn test_cancel_discards() {
        let mut form = controller();
        form.begin_edit(0, &note("a"));
        form.set_value("title", "changed");
        form.cancel();
        assert_eq!(form.value("title"), "");
        assert_eq!(form.value("tag"), "misc");
        assert!(!form.is_editing());
    }

    #[test]
    fn test_on_removed_tracks_editing_index() {
        let mut form = controller();
        form.begin_edit(2, &note("c"));
        form.on_removed(0);
        assert_eq!(form.editing_index(), Some(1));
        form.on_removed(3);
        assert_eq!(form.editing_index(), Some(1));
        form.on_removed(1);
        assert_eq!(form.editing_index(), None);
        assert_eq!(form.value("title"), "");
    }
}
