//! Main application model and page router.
//!
//! The [`App`] owns the mounted screen and routes events: global keys
//! (quit, page shortcuts) are handled here, everything else goes to the
//! screen. Switching pages drops the old screen and mounts a fresh one.

use std::sync::Arc;

use recordbook::KeyValueStore;
use tracing::{debug, info};

use crate::key::Key;
use crate::messages::Page;
use crate::pages::{self, PageModel};
use crate::program::{Cmd, Event, Model};
use crate::theme::Theme;

/// Fallback width until the first resize arrives.
const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Command returned from [`App::update`].
pub type AppCmd = Cmd;

/// Main application model.
pub struct App {
    theme: Theme,
    page: Page,
    screen: Box<dyn PageModel>,
    port: Arc<dyn KeyValueStore>,
    width: u16,
    height: u16,
}

impl App {
    /// Create a new app on the first page.
    #[must_use]
    pub fn new(port: Arc<dyn KeyValueStore>, theme: Theme) -> Self {
        let page = Page::default();
        Self {
            theme,
            page,
            screen: pages::mount(page, &port),
            port,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    /// Start on `page` instead of the first page.
    #[must_use]
    pub fn with_start_page(mut self, page: Page) -> Self {
        self.navigate(page);
        self
    }

    /// Get the current page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Get the terminal size last reported.
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Navigate to a page, mounting a fresh screen.
    ///
    /// Returns false (and keeps the screen) when `page` is already shown.
    pub fn navigate(&mut self, page: Page) -> bool {
        if page == self.page {
            return false;
        }
        info!(from = %self.page, to = %page, "navigate");
        self.screen = pages::mount(page, &self.port);
        self.page = page;
        true
    }

    /// Handle page-switching keys. Returns true if the key was consumed.
    fn handle_global_key(&mut self, key: Key) -> bool {
        match key {
            Key::F(n) => {
                if let Some(page) = Page::from_shortcut(n) {
                    self.navigate(page);
                }
                true
            }
            Key::CtrlRight => {
                self.navigate(self.page.next());
                true
            }
            Key::CtrlLeft => {
                self.navigate(self.page.prev());
                true
            }
            _ => false,
        }
    }

    fn tab_bar(&self) -> String {
        Page::all()
            .iter()
            .map(|&page| {
                let label = format!(" F{} {} ", page.shortcut(), page.name());
                if page == self.page {
                    self.theme.selected(&label)
                } else {
                    self.theme.muted(&label)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn footer(&self) -> String {
        self.theme.muted(&format!(
            "{}  \u{2022}  F1-F7 pages  ctrl+\u{2190}/\u{2192} switch  ctrl+c quit",
            self.screen.hints()
        ))
    }
}

impl Model for App {
    fn update(&mut self, event: Event) -> Option<AppCmd> {
        match event {
            Event::Resize { width, height } => {
                debug!(width, height, "resize");
                self.width = width;
                self.height = height;
                None
            }
            Event::Key(Key::CtrlC) => {
                info!("quit requested");
                Some(Cmd::Quit)
            }
            Event::Key(key) => {
                if self.handle_global_key(key) {
                    return None;
                }
                self.screen.update(key)
            }
        }
    }

    fn view(&self) -> String {
        let tabs = self.tab_bar();
        let rule = self.theme.muted(&"\u{2500}".repeat(usize::from(self.width)));
        [
            tabs,
            rule.clone(),
            String::new(),
            self.screen.view(&self.theme),
            String::new(),
            rule,
            self.footer(),
        ]
        .join("\n")
    }
}
