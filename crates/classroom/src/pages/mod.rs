//! Screen models for `classroom`.
//!
//! Each screen implements [`PageModel`] so the [`App`](crate::app::App)
//! router can delegate keys and rendering to whichever one is mounted.

mod directory;
mod gpa;
mod practice;
mod todo;

pub use directory::{DirectoryFocus, DirectoryPage};
pub use gpa::GpaPage;
pub use practice::PracticePage;
pub use todo::TodoPage;

use std::sync::Arc;

use recordbook::KeyValueStore;

use crate::key::Key;
use crate::messages::Page;
use crate::program::Cmd;
use crate::theme::Theme;

/// Trait for screens that can be routed to.
pub trait PageModel {
    /// Handle a key the app did not consume.
    fn update(&mut self, key: Key) -> Option<Cmd>;

    /// Render the screen body (without the tab bar and footer).
    fn view(&self, theme: &Theme) -> String;

    /// Get the page identifier.
    fn page(&self) -> Page;

    /// Get context-sensitive key hints for the footer.
    fn hints(&self) -> &'static str {
        "tab next field  enter submit"
    }
}

/// Builds a fresh screen for `page`.
///
/// Only the directory touches `port`; it reloads its records on every mount.
#[must_use]
pub fn mount(page: Page, port: &Arc<dyn KeyValueStore>) -> Box<dyn PageModel> {
    match page {
        Page::Practice => Box::new(PracticePage::new()),
        Page::TodoBasic => Box::new(TodoPage::basic()),
        Page::TodoExtended => Box::new(TodoPage::extended()),
        Page::TodoForm => Box::new(TodoPage::managed()),
        Page::TodoValidated => Box::new(TodoPage::validated()),
        Page::Gpa => Box::new(GpaPage::new()),
        Page::Directory => Box::new(DirectoryPage::new(Arc::clone(port))),
    }
}

/// Heading line shared by every screen.
fn heading(theme: &Theme, text: &str) -> String {
    theme.title(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordbook::MemoryStore;

    #[test]
    fn test_mount_matches_page() {
        let port: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        for page in Page::all() {
            assert_eq!(mount(page, &port).page(), page);
        }
    }
}
