//! Course grades and the grade-point average.

use recordbook::GpaReading;
use recordbook::records::{GradeEntry, grade_schema};
use tracing::info;

use super::{PageModel, heading};
use crate::components::{Focus, RecordListView};
use crate::key::Key;
use crate::messages::Page;
use crate::program::Cmd;
use crate::theme::{Theme, spacing};

/// Grade list with an on-demand average.
#[derive(Debug, Clone)]
pub struct GpaPage {
    list: RecordListView<GradeEntry>,
    reading: GpaReading,
}

impl Default for GpaPage {
    fn default() -> Self {
        Self::new()
    }
}

impl GpaPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: RecordListView::new(grade_schema(), "Add course", grade_row)
                .with_empty_text("No courses yet."),
            reading: GpaReading::new(),
        }
    }

    pub const fn list(&self) -> &RecordListView<GradeEntry> {
        &self.list
    }

    pub const fn reading(&self) -> &GpaReading {
        &self.reading
    }

    /// Recomputes the average from the current list. Does nothing while the
    /// list is empty.
    pub fn compute(&mut self) {
        let records = self.list.store().records();
        if records.is_empty() {
            return;
        }
        let gpa = self.reading.compute(records.iter().map(|r| r.grade));
        info!(courses = records.len(), ?gpa, "gpa computed");
    }
}

impl PageModel for GpaPage {
    fn update(&mut self, key: Key) -> Option<Cmd> {
        if self.list.focus() == Focus::List && key == Key::Char('g') {
            self.compute();
            return None;
        }
        if self.list.handle_key(key).is_mutation() {
            self.reading.invalidate();
        }
        None
    }

    fn view(&self, theme: &Theme) -> String {
        let mut summary = format!("GPA: {}", theme.strong(&self.reading.display()));
        if self.reading.is_stale() {
            summary.push_str(&format!(" {}", theme.error("(stale)")));
        }
        summary.push_str(&format!("  {}", theme.muted("(W excluded, F = 0.00)")));

        format!(
            "{}\n\n{}\n\n{}{summary}",
            heading(theme, "Courses and GPA"),
            self.list.view(theme),
            " ".repeat(spacing::INDENT),
        )
    }

    fn page(&self) -> Page {
        Page::Gpa
    }

    fn hints(&self) -> &'static str {
        match self.list.focus() {
            Focus::Form => "tab next field  \u{2190}/\u{2192} grade  enter add",
            Focus::List => "\u{2191}/\u{2193} select  d delete  g compute GPA",
        }
    }
}

fn grade_row(entry: &GradeEntry, theme: &Theme) -> String {
    let subject = if entry.grade.is_failing() {
        theme.error(&entry.subject)
    } else {
        theme.strong(&entry.subject)
    };
    format!("{subject} ({})", entry.grade.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(page: &mut GpaPage, subject: &str, rights: usize) {
        for key in Key::typed(subject) {
            page.update(key);
        }
        page.update(Key::Tab);
        for _ in 0..rights {
            page.update(Key::Right);
        }
        page.update(Key::Enter);
    }

    fn to_list(page: &mut GpaPage) {
        while page.list().focus() != Focus::List {
            page.update(Key::Tab);
        }
    }

    #[test]
    fn test_compute_excludes_withdrawals() {
        let mut page = GpaPage::new();
        add(&mut page, "Math", 0); // A
        add(&mut page, "Art", 2); // B
        add(&mut page, "Music", 8); // W

        to_list(&mut page);
        page.update(Key::Char('g'));
        assert_eq!(page.reading().value(), Some(3.5));
        assert!(page.view(&Theme::plain()).contains("GPA: 3.50"));
    }

    #[test]
    fn test_mutation_marks_stale() {
        let mut page = GpaPage::new();
        add(&mut page, "Math", 0);
        to_list(&mut page);
        page.update(Key::Char('g'));
        assert!(!page.reading().is_stale());

        page.update(Key::Char('d'));
        assert!(page.reading().is_stale());
        let text = page.view(&Theme::plain());
        assert!(text.contains("GPA: 4.00 (stale)"));
    }

    #[test]
    fn test_uncomputed_shows_dash() {
        let page = GpaPage::new();
        assert!(page.view(&Theme::plain()).contains("GPA: -"));
    }

    #[test]
    fn test_g_in_form_types_into_subject() {
        let mut page = GpaPage::new();
        page.update(Key::Char('g'));
        assert_eq!(page.list().form().controller().value("subject"), "g");
        assert!(!page.reading().is_computed());
    }

    #[test]
    fn test_failing_row_uses_error_style() {
        let entry = GradeEntry {
            subject: "Physics".into(),
            grade: recordbook::Grade::F,
        };
        assert_eq!(grade_row(&entry, &Theme::plain()), "Physics (F)");
        let colored = grade_row(&entry, &Theme::new(true));
        assert_eq!(crate::theme::strip_ansi(&colored), "Physics (F)");
    }
}
