use crossterm::event::Event;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// Input from the terminal.
    Input(Event),
}
