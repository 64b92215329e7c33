use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// Callbacks invoked by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Configure tick and render timing here.
    fn init(&mut self, runtime: &mut Runtime);

    /// Checked before every event; the run ends as soon as this returns true.
    fn should_exit(&self) -> bool;

    /// Terminal input (keys, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Timer tick.
    fn on_tick(&mut self, runtime: &mut Runtime);
}
