//! Headless self-check.
//!
//! Drives a full [`App`] through the simulator against an in-memory store and
//! verifies each screen's main flow from the rendered text. No TTY needed.

use std::fmt;
use std::sync::Arc;

use recordbook::MemoryStore;
use recordbook::records::MEMBER_STORAGE_KEY;
use tracing::info;

use crate::app::App;
use crate::key::Key;
use crate::messages::Page;
use crate::simulator::ProgramSimulator;
use crate::theme::Theme;

/// A check whose rendered output did not match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("self-check {check:?} failed: expected {expected:?} on screen\n{screen}")]
pub struct SelfCheckError {
    pub check: &'static str,
    pub expected: String,
    pub screen: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfCheckReport {
    /// Names of the checks that passed, in order.
    pub passed: Vec<&'static str>,
    /// Events fed to the app.
    pub events: usize,
}

impl fmt::Display for SelfCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.passed {
            writeln!(f, "ok  {check}")?;
        }
        write!(
            f,
            "{} checks passed ({} events)",
            self.passed.len(),
            self.events
        )
    }
}

struct Runner {
    sim: ProgramSimulator<App>,
    report: SelfCheckReport,
}

impl Runner {
    fn keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.sim.press_all(keys);
        self.report.events += self.sim.run_until_empty();
    }

    fn text(&mut self, text: &str) {
        self.keys(Key::typed(text));
    }

    fn expect(&self, check: &'static str, expected: &str) -> Result<(), SelfCheckError> {
        let screen = self.sim.last_view().unwrap_or_default();
        if screen.contains(expected) {
            Ok(())
        } else {
            Err(SelfCheckError {
                check,
                expected: expected.to_string(),
                screen: screen.to_string(),
            })
        }
    }

    fn pass(&mut self, check: &'static str) {
        info!(check, "self-check passed");
        self.report.passed.push(check);
    }
}

fn heading(page: Page) -> &'static str {
    match page {
        Page::Practice => "CSMJU",
        Page::TodoBasic => "Todo (basic)",
        Page::TodoExtended => "Todo (extended fields)",
        Page::TodoForm => "Todo (managed form)",
        Page::TodoValidated => "Todo (validated)",
        Page::Gpa => "Courses and GPA",
        Page::Directory => "Member directory",
    }
}

/// Runs every scripted flow.
///
/// # Errors
///
/// Returns the first check whose expected text is missing from the screen.
pub fn run() -> Result<SelfCheckReport, SelfCheckError> {
    let memory = Arc::new(MemoryStore::new());
    let app = App::new(memory.clone(), Theme::plain());
    let mut runner = Runner {
        sim: ProgramSimulator::new(app),
        report: SelfCheckReport::default(),
    };
    runner.sim.init();

    for page in Page::all() {
        runner.keys([Key::F(page.shortcut())]);
        runner.expect("navigation", heading(page))?;
    }
    runner.pass("navigation");

    runner.keys([Key::F(1), Key::Char('+'), Key::Char('+'), Key::Char('-')]);
    runner.expect("practice counter", "Count: 1")?;
    runner.expect("practice counter", "(size 30)")?;
    runner.pass("practice counter");

    runner.keys([Key::F(2), Key::Char(' '), Key::Enter]);
    runner.expect("blank todo refused", "Please type a task")?;
    runner.keys([Key::Backspace]);
    runner.text("read chapter 3");
    runner.keys([Key::Enter]);
    runner.expect("todo added", "  read chapter 3")?;
    runner.pass("todo add and validate");

    runner.keys([Key::F(5)]);
    runner.text("essay");
    runner.keys([Key::Tab, Key::Right, Key::Tab]);
    runner.text("05-01-2024");
    runner.keys([Key::Enter]);
    runner.expect("date rule", "Invalid date format (YYYY-MM-DD)")?;
    runner.pass("validated todo date rule");

    runner.keys([Key::F(6)]);
    for (subject, rights) in [("Math", 0), ("Art", 2), ("Music", 8)] {
        runner.text(subject);
        runner.keys([Key::Tab]);
        runner.keys(std::iter::repeat_n(Key::Right, rights));
        runner.keys([Key::Enter]);
    }
    runner.keys([Key::Tab, Key::Tab, Key::Char('g')]);
    runner.expect("gpa", "GPA: 3.50")?;
    runner.keys([Key::Char('d')]);
    runner.expect("gpa stale", "(stale)")?;
    runner.pass("gpa compute");

    runner.keys([Key::F(7)]);
    runner.expect("directory seed", "1 records")?;
    runner.keys([Key::Tab, Key::Char('d'), Key::Char('n')]);
    runner.expect("directory delete declined", "1 records")?;
    runner.keys([Key::CtrlN]);
    for field in ["Ms", "Suda", "Rak"] {
        runner.text(field);
        runner.keys([Key::Tab]);
    }
    runner.text("Green");
    runner.keys([Key::Enter]);
    runner.expect("directory add", "2 records")?;
    runner.keys([Key::BackTab, Key::BackTab, Key::Right, Key::Right]);
    runner.expect("directory party filter", "1 records")?;
    runner.expect("directory party filter", "MsSuda Rak")?;
    runner.keys([Key::Esc]);
    runner.expect("directory clear filter", "2 records")?;
    runner.pass("directory add and filter");

    let saved = memory.raw(MEMBER_STORAGE_KEY).unwrap_or_default();
    if !saved.contains(r#""firstName":"Suda""#) {
        return Err(SelfCheckError {
            check: "directory persisted",
            expected: "firstName Suda in stored blob".to_string(),
            screen: saved,
        });
    }
    runner.pass("directory persisted");

    runner.keys([Key::CtrlC]);
    if !runner.sim.is_quit() {
        return Err(SelfCheckError {
            check: "quit",
            expected: "quit request".to_string(),
            screen: runner.sim.last_view().unwrap_or_default().to_string(),
        });
    }
    runner.pass("quit");

    Ok(runner.report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_check_passes() {
        let report = run().unwrap();
        assert!(report.passed.contains(&"gpa compute"));
        assert!(report.passed.contains(&"directory persisted"));
        assert!(report.events > 50);
        assert!(report.to_string().ends_with(&format!("({} events)", report.events)));
    }
}
