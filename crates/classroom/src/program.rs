//! Program lifecycle and event loop.
//!
//! [`Program`] owns the terminal for the lifetime of a [`Model`]: it enters
//! raw mode (and optionally the alternate screen), feeds key and resize
//! events to [`Model::update`], re-renders when the view changes, and
//! restores the terminal on the way out, including on error.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, trace};

use crate::key::{Key, from_crossterm_key};

/// Errors that can occur while running a program.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`Io`](ProgramError::Io) | Check the output stream, retry or report |
/// | [`RawMode`](ProgramError::RawMode) | Run from an interactive terminal |
#[derive(thiserror::Error, Debug)]
pub enum ProgramError {
    /// I/O error while drawing or polling.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Raw mode could not be enabled. Usually means stdin is not a TTY.
    #[error("failed to enable raw mode: {0}")]
    RawMode(#[source] io::Error),
}

/// A specialized `Result` for program operations.
pub type Result<T> = std::result::Result<T, ProgramError>;

/// Input delivered to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(Key),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

/// Side effects a model can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Stop the program.
    Quit,
}

/// The Elm-style application contract.
pub trait Model {
    /// Returns an optional startup command.
    fn init(&self) -> Option<Cmd> {
        None
    }

    /// Applies one event.
    fn update(&mut self, event: Event) -> Option<Cmd>;

    /// Renders the whole screen. Must not mutate state.
    fn view(&self) -> String;
}

/// Program options.
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Polling rate for terminal events.
    pub fps: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: false,
            fps: 30,
        }
    }
}

/// The terminal runner.
///
/// ```rust,ignore
/// let final_model = Program::new(app).with_alt_screen().run()?;
/// ```
pub struct Program<M: Model> {
    model: M,
    options: ProgramOptions,
}

impl<M: Model> Program<M> {
    /// Creates a program for `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ProgramOptions::default(),
        }
    }

    /// Uses the alternate screen buffer.
    #[must_use]
    pub const fn with_alt_screen(mut self) -> Self {
        self.options.alt_screen = true;
        self
    }

    /// Sets the event polling rate (clamped to 1..=120).
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.options.fps = fps.clamp(1, 120);
        self
    }

    /// Returns the configured options.
    pub const fn options(&self) -> &ProgramOptions {
        &self.options
    }

    /// Runs on stdout and returns the final model.
    pub fn run(self) -> Result<M> {
        self.run_with_writer(io::stdout())
    }

    /// Runs against `writer` and returns the final model.
    pub fn run_with_writer<W: Write>(self, mut writer: W) -> Result<M> {
        let options = self.options.clone();

        enable_raw_mode().map_err(ProgramError::RawMode)?;
        if options.alt_screen {
            execute!(writer, EnterAlternateScreen)?;
        }
        execute!(writer, Hide)?;

        let result = self.event_loop(&mut writer);

        let _ = execute!(writer, Show);
        if options.alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();

        result
    }

    fn event_loop<W: Write>(mut self, writer: &mut W) -> Result<M> {
        if let Ok((width, height)) = terminal::size() {
            self.model.update(Event::Resize { width, height });
        }
        if self.model.init() == Some(Cmd::Quit) {
            return Ok(self.model);
        }

        let mut last_view = String::new();
        render(&self.model, writer, &mut last_view)?;

        let frame = Duration::from_secs_f64(1.0 / f64::from(self.options.fps));
        loop {
            if !event::poll(frame)? {
                continue;
            }
            let event = match event::read()? {
                TermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    match from_crossterm_key(key_event.code, key_event.modifiers) {
                        Some(key) => Event::Key(key),
                        None => continue,
                    }
                }
                TermEvent::Resize(width, height) => Event::Resize { width, height },
                _ => continue,
            };

            trace!(?event, "dispatch");
            if self.model.update(event) == Some(Cmd::Quit) {
                debug!("quit requested");
                return Ok(self.model);
            }
            render(&self.model, writer, &mut last_view)?;
        }
    }
}

fn render<M: Model, W: Write>(model: &M, writer: &mut W, last_view: &mut String) -> Result<()> {
    let view = model.view();
    if view == *last_view {
        return Ok(());
    }

    execute!(writer, MoveTo(0, 0), Clear(ClearType::All))?;
    // Raw mode does not translate LF.
    write!(writer, "{}", view.replace('\n', "\r\n"))?;
    writer.flush()?;

    *last_view = view;
    Ok(())
}
