use blockfall_engine::{Command, GameEngine};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, HorizontalAlignment, Layout},
    widgets::{Block as BlockWidget, Padding},
};

use crate::{
    tui::{App, RenderMode, Runtime},
    view::widgets::{BoardDisplay, GameOverDisplay, KeyBinding, KeyBindingDisplay, StatsDisplay},
};

const FPS: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Restart,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if !event.is_press() {
            return None;
        }
        match event.code {
            KeyCode::Left => Some(Self::MoveLeft),
            KeyCode::Right => Some(Self::MoveRight),
            KeyCode::Up => Some(Self::Rotate),
            KeyCode::Down => Some(Self::SoftDrop),
            KeyCode::Char(' ') => Some(Self::HardDrop),
            KeyCode::Char('r' | 'R') => Some(Self::Restart),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    /// The engine command this action issues, if any.
    fn command(self) -> Option<Command> {
        match self {
            Self::MoveLeft => Some(Command::MoveLeft),
            Self::MoveRight => Some(Command::MoveRight),
            Self::Rotate => Some(Command::Rotate),
            Self::SoftDrop => Some(Command::SoftDrop),
            Self::HardDrop => Some(Command::HardDrop),
            Self::Restart => Some(Command::Restart),
            Self::Quit => None,
        }
    }

    fn bindings(game_over: bool) -> &'static [KeyBinding] {
        const RESTART: KeyBinding = KeyBinding {
            keys: &["r"],
            description: "Restart",
        };
        const QUIT: KeyBinding = KeyBinding {
            keys: &["q", "Esc"],
            description: "Quit",
        };
        if game_over {
            return &[RESTART, QUIT];
        }
        &[
            KeyBinding {
                keys: &["←", "→"],
                description: "Move",
            },
            KeyBinding {
                keys: &["↑"],
                description: "Rotate",
            },
            KeyBinding {
                keys: &["↓"],
                description: "Soft Drop",
            },
            KeyBinding {
                keys: &["Space"],
                description: "Hard Drop",
            },
            RESTART,
            QUIT,
        ]
    }
}

/// Interactive game: keys become engine commands and the timer drives ticks.
#[derive(Debug)]
pub(crate) struct PlayApp {
    engine: GameEngine,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            is_exiting: false,
        }
    }

    pub(crate) fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The timer follows the engine: its interval shrinks as lines are
    /// cleared, and it stops while the game is over.
    fn sync_tick_interval(&self, runtime: &mut Runtime) {
        let interval = (!self.engine.is_game_over()).then(|| self.engine.drop_interval());
        runtime.set_tick_interval(interval);
    }

    fn perform(&mut self, action: Action) {
        match action.command() {
            Some(command) => _ = self.engine.apply(command),
            None => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        self.sync_tick_interval(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            self.perform(action);
            self.sync_tick_interval(runtime);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.engine.snapshot();

        let board = BoardDisplay::new(&snapshot).block(
            BlockWidget::bordered()
                .title("BLOCKFALL")
                .title_alignment(HorizontalAlignment::Center)
                .padding(Padding::horizontal(1)),
        );
        let stats = StatsDisplay::new(&snapshot, self.engine.drop_interval())
            .block(BlockWidget::bordered().padding(Padding::horizontal(1)));
        let help = KeyBindingDisplay::new(Action::bindings(snapshot.game_over));

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(KeyBindingDisplay::height()),
        ])
        .areas(frame.area().centered_vertically(Constraint::Length(
            board.height() + KeyBindingDisplay::height(),
        )));
        let [board_area, stats_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .areas(main_area);
        let stats_area = stats_area.centered_vertically(Constraint::Length(stats.height()));

        frame.render_widget(board, board_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help, help_area);
        if snapshot.game_over {
            frame.render_widget(GameOverDisplay, board_area);
        }
    }

    fn on_tick(&mut self, runtime: &mut Runtime) {
        self.engine.tick();
        self.sync_tick_interval(runtime);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{EngineConfig, PieceSeed};
    use crossterm::event::{KeyEventKind, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> PlayApp {
        let seed = PieceSeed::from_bytes([7; 16]);
        PlayApp::new(GameEngine::with_seed(EngineConfig::default(), seed))
    }

    #[test]
    fn test_key_map() {
        let cases = [
            (KeyCode::Left, Some(Action::MoveLeft)),
            (KeyCode::Right, Some(Action::MoveRight)),
            (KeyCode::Up, Some(Action::Rotate)),
            (KeyCode::Down, Some(Action::SoftDrop)),
            (KeyCode::Char(' '), Some(Action::HardDrop)),
            (KeyCode::Char('r'), Some(Action::Restart)),
            (KeyCode::Char('Q'), Some(Action::Quit)),
            (KeyCode::Esc, Some(Action::Quit)),
            (KeyCode::Char('x'), None),
        ];
        for (code, expected) in cases {
            assert_eq!(Action::from_key_event(&press(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut event = press(KeyCode::Left);
        event.kind = KeyEventKind::Release;
        assert_eq!(Action::from_key_event(&event), None);
    }

    #[test]
    fn test_actions_reach_engine() {
        let mut app = app();
        let x = app.engine().piece().anchor().x();
        app.perform(Action::MoveLeft);
        assert_eq!(app.engine().piece().anchor().x(), x - 1);

        app.perform(Action::HardDrop);
        assert_eq!(app.engine().stats().locked_pieces(), 1);

        app.perform(Action::Restart);
        assert_eq!(app.engine().stats().locked_pieces(), 0);
        assert!(!app.should_exit());

        app.perform(Action::Quit);
        assert!(app.should_exit());
    }
}
