//! Persisted member directory.
//!
//! The list is filtered for display only: every row action resolves the
//! visible row to its backing index before touching the store. Deleting asks
//! for confirmation in a modal line; anything but `y` leaves the list alone.

use std::sync::Arc;

use recordbook::records::{MEMBER_STORAGE_KEY, Member, member_schema, member_seed};
use recordbook::{KeyValueStore, PersistentStore, RecordFilter, SubmitOutcome, distinct_categories};
use tracing::{debug, info};

use super::{PageModel, heading};
use crate::components::{FormEvent, FormView, ListCursor};
use crate::key::Key;
use crate::messages::Page;
use crate::program::Cmd;
use crate::theme::{Theme, pad_right, spacing};

/// Region receiving keys. Tab order is search, list, form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryFocus {
    #[default]
    Search,
    List,
    Form,
}

/// Member directory screen.
#[derive(Debug)]
pub struct DirectoryPage {
    store: PersistentStore<Member>,
    form: FormView<Member>,
    filter: RecordFilter,
    cursor: ListCursor,
    focus: DirectoryFocus,
    pending_delete: Option<usize>,
}

impl DirectoryPage {
    /// Loads the directory from `port`, falling back to the seed record.
    #[must_use]
    pub fn new(port: Arc<dyn KeyValueStore>) -> Self {
        let store = PersistentStore::load(port, MEMBER_STORAGE_KEY, member_seed());
        debug!(count = store.len(), "directory mounted");
        Self {
            store,
            form: FormView::new(member_schema(), "Add member").with_edit_label("Save member"),
            filter: RecordFilter::new(),
            cursor: ListCursor::default(),
            focus: DirectoryFocus::Search,
            pending_delete: None,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Member] {
        self.store.records()
    }

    #[must_use]
    pub const fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    #[must_use]
    pub const fn focus(&self) -> DirectoryFocus {
        self.focus
    }

    #[must_use]
    pub const fn form(&self) -> &FormView<Member> {
        &self.form
    }

    /// Backing index awaiting delete confirmation.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<usize> {
        self.pending_delete
    }

    /// Backing indices of the rows on screen.
    #[must_use]
    pub fn visible(&self) -> Vec<usize> {
        self.filter.visible_indices(self.store.records())
    }

    /// Party filter options: empty for all parties, then each party present.
    #[must_use]
    pub fn party_options(&self) -> Vec<String> {
        let mut options = vec![String::new()];
        options.extend(distinct_categories(self.store.records()));
        options
    }

    fn selected_index(&self) -> Option<usize> {
        self.visible().get(self.cursor.selected()).copied()
    }

    fn cycle_party(&mut self, forward: bool) {
        let options = self.party_options();
        let len = options.len();
        let next = match options.iter().position(|p| *p == self.filter.category) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.filter.category = options[next].clone();
        self.cursor.reset();
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.cursor.reset();
    }

    /// Starts a blank record, leaving any edit in progress.
    fn start_new(&mut self) {
        self.form.controller_mut().cancel();
        self.form.focus_first();
        self.focus = DirectoryFocus::Form;
    }

    fn start_edit(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        if let Some(member) = self.store.get(index).cloned() {
            debug!(index, "editing member");
            self.form.begin_edit(index, &member);
            self.focus = DirectoryFocus::Form;
        }
    }

    fn confirm_delete(&mut self) {
        let Some(index) = self.pending_delete.take() else {
            return;
        };
        if let Some(member) = self.store.remove_at(index) {
            self.form.controller_mut().on_removed(index);
            info!(index, name = %member.full_name(), "member removed");
        }
        let visible = self.visible().len();
        self.cursor.clamp(visible);
        if visible == 0 {
            self.focus = DirectoryFocus::Search;
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            DirectoryFocus::Search if !self.visible().is_empty() => DirectoryFocus::List,
            DirectoryFocus::Search | DirectoryFocus::List => {
                self.form.focus_first();
                DirectoryFocus::Form
            }
            DirectoryFocus::Form => {
                if self.form.advance() {
                    DirectoryFocus::Form
                } else {
                    DirectoryFocus::Search
                }
            }
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            DirectoryFocus::Search => {
                self.form.focus_last();
                DirectoryFocus::Form
            }
            DirectoryFocus::List => DirectoryFocus::Search,
            DirectoryFocus::Form => {
                if self.form.retreat() {
                    DirectoryFocus::Form
                } else if self.visible().is_empty() {
                    DirectoryFocus::Search
                } else {
                    DirectoryFocus::List
                }
            }
        };
    }

    fn handle_search_key(&mut self, key: Key) {
        match key {
            Key::Char(c) => {
                self.filter.query.push(c);
                self.cursor.reset();
            }
            Key::Backspace => {
                self.filter.query.pop();
                self.cursor.reset();
            }
            Key::Left => self.cycle_party(false),
            Key::Right => self.cycle_party(true),
            Key::Esc => self.clear_filter(),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: Key) {
        match key {
            Key::Up => self.cursor.up(),
            Key::Down => self.cursor.down(self.visible().len()),
            Key::Char('e') | Key::Enter => self.start_edit(),
            Key::Char('d') | Key::Delete => self.pending_delete = self.selected_index(),
            Key::Char('c') => self.clear_filter(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: Key) {
        if let FormEvent::Submitted(outcome) = self.form.handle_key(key, &mut self.store) {
            match outcome {
                SubmitOutcome::Created(index) => info!(index, "member added"),
                SubmitOutcome::Updated(index) => info!(index, "member updated"),
                SubmitOutcome::Missing(index) => debug!(index, "edit target vanished"),
                SubmitOutcome::Rejected(errors) => {
                    debug!(fields = ?errors.keys().collect::<Vec<_>>(), "member rejected");
                }
            }
        }
    }

    fn list_view(&self, theme: &Theme) -> String {
        let indent = " ".repeat(spacing::INDENT);
        let visible = self.visible();
        if visible.is_empty() {
            return format!("{indent}{}", theme.muted("no matching records"));
        }

        let mut lines = Vec::new();
        for (row, &index) in visible.iter().enumerate() {
            let member = &self.store.records()[index];
            let name = member.full_name();
            let selected = self.focus == DirectoryFocus::List && row == self.cursor.selected();
            lines.push(if selected {
                format!("> {}", theme.selected(&name))
            } else {
                format!("{indent}{}", theme.strong(&name))
            });

            let detail_indent = " ".repeat(spacing::INDENT * 2);
            let party = if member.party.is_empty() { "-" } else { member.party.as_str() };
            lines.push(format!("{detail_indent}{}", theme.muted(&format!("Party: {party}"))));
            if !member.minister_position.is_empty() || !member.ministry.is_empty() {
                let position = if member.minister_position.is_empty() {
                    "-"
                } else {
                    member.minister_position.as_str()
                };
                let mut line = format!("Position: {position}");
                if !member.ministry.is_empty() {
                    line.push_str(&format!(" ({})", member.ministry));
                }
                lines.push(format!("{detail_indent}{}", theme.muted(&line)));
            }
            if !member.career.is_empty() {
                lines.push(format!("{detail_indent}Career: {}", member.career));
            }
            if !member.achievements.is_empty() {
                lines.push(format!("{detail_indent}Achievements: {}", member.achievements));
            }
        }
        lines.join("\n")
    }

    fn search_view(&self, theme: &Theme) -> String {
        let active = self.focus == DirectoryFocus::Search;
        let marker = if active { "> " } else { "  " };
        let query = if active {
            format!("{}_", self.filter.query)
        } else if self.filter.query.is_empty() {
            theme.muted("name, party or position")
        } else {
            self.filter.query.clone()
        };
        let party = if self.filter.category.is_empty() {
            "all parties"
        } else {
            self.filter.category.as_str()
        };
        let party = if active {
            format!("< {party} >")
        } else {
            party.to_string()
        };
        let count = theme.muted(&format!("{} records", self.visible().len()));

        let mut lines = vec![
            format!("{marker}{}{query}", pad_right("Search:", spacing::LABEL_WIDTH)),
            format!("  {}{party}    {count}", pad_right("Party:", spacing::LABEL_WIDTH)),
        ];
        if self.filter.is_active() {
            lines.push(format!("{}{}", " ".repeat(spacing::INDENT), theme.muted("c clear filters")));
        }
        lines.join("\n")
    }
}

impl PageModel for DirectoryPage {
    fn update(&mut self, key: Key) -> Option<Cmd> {
        if self.pending_delete.is_some() {
            match key {
                Key::Char('y' | 'Y') => self.confirm_delete(),
                Key::Char('n' | 'N') | Key::Esc => {
                    debug!(index = ?self.pending_delete, "delete declined");
                    self.pending_delete = None;
                }
                _ => {}
            }
            return None;
        }

        match (self.focus, key) {
            (_, Key::CtrlN) => self.start_new(),
            (_, Key::Tab) => self.focus_next(),
            (_, Key::BackTab) => self.focus_prev(),
            (DirectoryFocus::Search, key) => self.handle_search_key(key),
            (DirectoryFocus::List, key) => self.handle_list_key(key),
            (DirectoryFocus::Form, key) => self.handle_form_key(key),
        }
        None
    }

    fn view(&self, theme: &Theme) -> String {
        let mut sections = vec![
            heading(theme, "Member directory"),
            String::new(),
            self.search_view(theme),
            String::new(),
            self.list_view(theme),
            String::new(),
        ];

        let editing = self.form.controller().is_editing();
        let mut form_heading = theme.strong(if editing { "Edit member" } else { "Add member" });
        if editing {
            form_heading.push_str(&format!("  {}", theme.muted("ctrl+n new record")));
        }
        sections.push(form_heading);
        sections.push(self.form.view(theme, self.focus == DirectoryFocus::Form));

        if let Some(index) = self.pending_delete {
            let name = self
                .store
                .get(index)
                .map(Member::full_name)
                .unwrap_or_default();
            sections.push(String::new());
            sections.push(theme.error(&format!("Delete {name}? (y/n)")));
        }
        sections.join("\n")
    }

    fn page(&self) -> Page {
        Page::Directory
    }

    fn hints(&self) -> &'static str {
        if self.pending_delete.is_some() {
            return "y confirm  n cancel";
        }
        match self.focus {
            DirectoryFocus::Search => "type to search  \u{2190}/\u{2192} party  esc clear  tab list",
            DirectoryFocus::List => "\u{2191}/\u{2193} select  e edit  d delete  c clear filters",
            DirectoryFocus::Form => "tab next field  enter save  esc cancel  ctrl+n new",
        }
    }
}
