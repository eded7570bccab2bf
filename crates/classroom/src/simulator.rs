//! Program simulator for driving a model without a terminal.
//!
//! Used by tests and by the headless self-check. Events are queued, then
//! processed one at a time through `update` and `view`, exactly as
//! [`Program`](crate::program::Program) would.

use std::collections::VecDeque;

use crate::key::Key;
use crate::program::{Cmd, Event, Model};

/// Statistics tracked during simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Number of times init() was called.
    pub init_calls: usize,
    /// Number of times update() was called.
    pub update_calls: usize,
    /// Number of times view() was called.
    pub view_calls: usize,
    /// Whether quit was requested.
    pub quit_requested: bool,
}

/// A simulator for testing [`Model`] implementations.
///
/// # Example
///
/// ```rust
/// use classroom::key::Key;
/// use classroom::program::{Cmd, Event, Model};
/// use classroom::simulator::ProgramSimulator;
///
/// struct Counter { count: i32 }
///
/// impl Model for Counter {
///     fn update(&mut self, event: Event) -> Option<Cmd> {
///         if event == Event::Key(Key::Char('+')) {
///             self.count += 1;
///         }
///         None
///     }
///     fn view(&self) -> String {
///         format!("Count: {}", self.count)
///     }
/// }
///
/// let mut sim = ProgramSimulator::new(Counter { count: 0 });
/// sim.press_all([Key::Char('+'), Key::Char('+')]);
/// sim.run_until_empty();
///
/// assert_eq!(sim.last_view(), Some("Count: 2"));
/// ```
pub struct ProgramSimulator<M: Model> {
    model: M,
    queue: VecDeque<Event>,
    views: Vec<String>,
    stats: SimulationStats,
    initialized: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Creates a simulator around `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            views: Vec::new(),
            stats: SimulationStats::default(),
            initialized: false,
        }
    }

    /// Calls init() and captures the first view. Runs at most once.
    pub fn init(&mut self) -> Option<Cmd> {
        if self.initialized {
            return None;
        }
        self.initialized = true;
        self.stats.init_calls += 1;

        let cmd = self.model.init();
        if cmd == Some(Cmd::Quit) {
            self.stats.quit_requested = true;
        }
        self.capture_view();
        cmd
    }

    /// Queues an event.
    pub fn send(&mut self, event: impl Into<Event>) {
        self.queue.push_back(event.into());
    }

    /// Queues a key press.
    pub fn press(&mut self, key: Key) {
        self.send(key);
    }

    /// Queues several key presses.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.queue.extend(keys.into_iter().map(Event::Key));
    }

    /// Queues one key press per character of `text`.
    pub fn type_text(&mut self, text: &str) {
        self.press_all(Key::typed(text));
    }

    /// Processes one queued event. Returns the command from update().
    pub fn step(&mut self) -> Option<Cmd> {
        if !self.initialized {
            self.init();
        }

        let event = self.queue.pop_front()?;
        self.stats.update_calls += 1;
        let cmd = self.model.update(event);
        if cmd == Some(Cmd::Quit) {
            self.stats.quit_requested = true;
        }
        self.capture_view();
        cmd
    }

    /// Processes queued events until the queue is empty or quit is requested.
    ///
    /// Returns the number of events processed.
    pub fn run_until_empty(&mut self) -> usize {
        if !self.initialized {
            self.init();
        }
        let mut processed = 0;
        while !self.queue.is_empty() && !self.stats.quit_requested {
            self.step();
            processed += 1;
        }
        processed
    }

    fn capture_view(&mut self) {
        self.stats.view_calls += 1;
        self.views.push(self.model.view());
    }

    /// Returns the model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Returns the model mutably.
    pub const fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consumes the simulator and returns the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Returns the simulation statistics.
    pub const fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Returns every captured view.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// Returns the most recent view.
    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }

    /// Returns true once quit was requested.
    pub const fn is_quit(&self) -> bool {
        self.stats.quit_requested
    }

    /// Returns the number of queued events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        keys: Vec<Key>,
    }

    impl Model for Tally {
        fn update(&mut self, event: Event) -> Option<Cmd> {
            match event {
                Event::Key(Key::Char('q')) => Some(Cmd::Quit),
                Event::Key(key) => {
                    self.keys.push(key);
                    None
                }
                Event::Resize { .. } => None,
            }
        }

        fn view(&self) -> String {
            format!("{} keys", self.keys.len())
        }
    }

    #[test]
    fn test_init_runs_once() {
        let mut sim = ProgramSimulator::new(Tally::default());
        sim.init();
        sim.init();
        assert_eq!(sim.stats().init_calls, 1);
        assert_eq!(sim.views(), &["0 keys"]);
    }

    #[test]
    fn test_step_initializes_lazily() {
        let mut sim = ProgramSimulator::new(Tally::default());
        sim.press(Key::Enter);
        sim.step();
        assert_eq!(sim.stats().init_calls, 1);
        assert_eq!(sim.stats().update_calls, 1);
        assert_eq!(sim.last_view(), Some("1 keys"));
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut sim = ProgramSimulator::new(Tally::default());
        sim.type_text("abqcd");
        let processed = sim.run_until_empty();

        assert_eq!(processed, 3);
        assert!(sim.is_quit());
        assert_eq!(sim.pending_count(), 2);
        assert_eq!(sim.model().keys, vec![Key::Char('a'), Key::Char('b')]);
    }

    #[test]
    fn test_resize_events_pass_through() {
        let mut sim = ProgramSimulator::new(Tally::default());
        sim.send(Event::Resize {
            width: 10,
            height: 5,
        });
        assert_eq!(sim.run_until_empty(), 1);
        assert_eq!(sim.stats().view_calls, 2);
    }
}
