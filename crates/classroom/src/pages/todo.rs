//! The four todo screens.
//!
//! They differ only in record shape and rule table; each adds through its
//! form and deletes from its list immediately.

use recordbook::{Record, Schema};
use recordbook::records::{
    Category, Task, TodoItem, task_extended_schema, task_managed_schema, task_validated_schema,
    todo_basic_schema,
};

use super::{PageModel, heading};
use crate::components::{Focus, RecordListView, RowFn};
use crate::key::Key;
use crate::messages::Page;
use crate::program::Cmd;
use crate::theme::Theme;

/// A todo screen over record type `R`.
#[derive(Debug, Clone)]
pub struct TodoPage<R> {
    page: Page,
    title: &'static str,
    list: RecordListView<R>,
}

impl<R: Record> TodoPage<R> {
    fn with_list(page: Page, title: &'static str, list: RecordListView<R>) -> Self {
        Self { page, title, list }
    }

    /// The list and its form.
    pub const fn list(&self) -> &RecordListView<R> {
        &self.list
    }
}

impl TodoPage<TodoItem> {
    /// Title-only list.
    #[must_use]
    pub fn basic() -> Self {
        Self::with_list(
            Page::TodoBasic,
            "Todo (basic)",
            RecordListView::new(todo_basic_schema(), "Add", item_row).with_empty_text("No tasks yet."),
        )
    }
}

impl TodoPage<Task> {
    /// Title, category and due date with plain checks.
    #[must_use]
    pub fn extended() -> Self {
        Self::tasks(Page::TodoExtended, "Todo (extended fields)", task_extended_schema())
    }

    /// Title required, other fields taken as typed.
    #[must_use]
    pub fn managed() -> Self {
        Self::tasks(Page::TodoForm, "Todo (managed form)", task_managed_schema())
    }

    /// Full rule table: trimmed title, known category, `YYYY-MM-DD` date.
    #[must_use]
    pub fn validated() -> Self {
        Self::tasks(Page::TodoValidated, "Todo (validated)", task_validated_schema())
    }

    fn tasks(page: Page, title: &'static str, schema: Schema) -> Self {
        let row: RowFn<Task> = task_row;
        Self::with_list(
            page,
            title,
            RecordListView::new(schema, "Add", row).with_empty_text("No tasks yet."),
        )
    }
}

impl<R: Record> PageModel for TodoPage<R> {
    fn update(&mut self, key: Key) -> Option<Cmd> {
        self.list.handle_key(key);
        None
    }

    fn view(&self, theme: &Theme) -> String {
        format!("{}\n\n{}", heading(theme, self.title), self.list.view(theme))
    }

    fn page(&self) -> Page {
        self.page
    }

    fn hints(&self) -> &'static str {
        match self.list.focus() {
            Focus::Form => "tab next field  \u{2190}/\u{2192} choose  enter add",
            Focus::List => "\u{2191}/\u{2193} select  d delete  tab back to form",
        }
    }
}

fn item_row(item: &TodoItem, _theme: &Theme) -> String {
    item.title.clone()
}

fn task_row(task: &Task, theme: &Theme) -> String {
    let mut row = theme.strong(&task.title);
    if !task.category.is_empty() {
        row.push_str(&format!(" | Category: {}", category_label(&task.category)));
    }
    if !task.due_date.is_empty() {
        row.push_str(&format!(" | Due: {}", task.due_date));
    }
    row
}

fn category_label(value: &str) -> &str {
    Category::ALL
        .iter()
        .find(|c| c.value() == value)
        .map_or(value, |c| c.label())
}
