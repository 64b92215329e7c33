use std::time::Duration;

use arrayvec::ArrayVec;
use log::{debug, error, info, trace};

use crate::{
    core::{
        board::{BOARD_LEN, Board},
        collision::{self, Clearance, Direction},
        piece::{Piece, SPAWN_ANCHOR},
    },
    engine::{
        command::{Command, CommandOutcome},
        config::{EngineConfig, RotationPolicy},
        game_stats::GameStats,
        piece_generator::{PieceGenerator, PieceSeed},
        snapshot::GameSnapshot,
    },
};

/// Lifecycle of a game.
///
/// Locking is transient and happens inside a single [`GameEngine::tick`], so
/// only the falling and terminal states are observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GamePhase {
    Falling,
    GameOver,
}

/// Owns the board, the falling piece and the progress counters, and applies
/// commands to them one at a time.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    board: Board,
    piece: Piece,
    stats: GameStats,
    phase: GamePhase,
    generator: PieceGenerator,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GameEngine {
    /// Starts a game with a randomly seeded piece generator.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::from_generator(config, PieceGenerator::new())
    }

    /// Starts a reproducible game.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Self {
        Self::from_generator(config, PieceGenerator::with_seed(seed))
    }

    /// Starts from a prepared board and falling piece.
    ///
    /// Pieces spawned after the first lock come from `seed`.
    #[must_use]
    pub fn with_board(config: EngineConfig, seed: PieceSeed, board: Board, piece: Piece) -> Self {
        Self {
            stats: GameStats::new(config.initial_speed),
            config,
            board,
            piece,
            phase: GamePhase::Falling,
            generator: PieceGenerator::with_seed(seed),
        }
    }

    fn from_generator(config: EngineConfig, mut generator: PieceGenerator) -> Self {
        let piece = Piece::new(generator.next_kind());
        Self {
            stats: GameStats::new(config.initial_speed),
            config,
            board: Board::EMPTY,
            piece,
            phase: GamePhase::Falling,
            generator,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// One-cell moves currently open to the falling piece.
    #[must_use]
    pub fn clearance(&self) -> Clearance {
        Clearance::of(&self.piece, &self.board)
    }

    /// Board indices covered by the falling piece that are on the board.
    #[must_use]
    pub fn active_cells(&self) -> ArrayVec<usize, 4> {
        self.piece
            .cells()
            .into_iter()
            .filter_map(|cell| usize::try_from(cell).ok())
            .filter(|&cell| cell < BOARD_LEN)
            .collect()
    }

    /// How long the timer should wait before the next [`Command::Tick`].
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.stats.drop_interval(self.config.min_drop_interval)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active_cells: self.active_cells(),
            piece: self.piece,
            stats: self.stats.clone(),
            game_over: self.is_game_over(),
        }
    }

    /// Dispatches a command to its handler.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Tick => self.tick(),
            Command::Restart => self.restart(),
        }
    }

    pub fn move_left(&mut self) -> CommandOutcome {
        self.shift(Direction::Left)
    }

    pub fn move_right(&mut self) -> CommandOutcome {
        self.shift(Direction::Right)
    }

    /// Turns the piece one step clockwise.
    ///
    /// With [`RotationPolicy::Permissive`] the new orientation is always
    /// taken, even if it overlaps locked cells or crosses an edge. With
    /// [`RotationPolicy::Guarded`] such a rotation is refused.
    pub fn rotate(&mut self) -> CommandOutcome {
        if self.is_game_over() {
            return CommandOutcome::Ignored;
        }
        let rotated = self.piece.rotated();
        if self.config.rotation == RotationPolicy::Guarded
            && !collision::fits(&rotated, &self.board)
        {
            trace!("rotation to {:?} blocked", rotated.orientation());
            return CommandOutcome::Blocked;
        }
        self.piece = rotated;
        CommandOutcome::Applied
    }

    /// Moves the piece one row down if nothing is below it. Never locks.
    pub fn soft_drop(&mut self) -> CommandOutcome {
        self.shift(Direction::Down)
    }

    /// Drops the piece as far as it goes and locks it with one tick.
    pub fn hard_drop(&mut self) -> CommandOutcome {
        while self.soft_drop().is_applied() {}
        self.tick()
    }

    /// Runs one drop cycle.
    ///
    /// 1. If the piece can fall, it moves down one row.
    /// 2. If it cannot and is still on the spawn row, the game is over.
    /// 3. Otherwise it is locked, full rows are cleared and the next piece
    ///    spawns at the top.
    pub fn tick(&mut self) -> CommandOutcome {
        if self.is_game_over() {
            return CommandOutcome::Ignored;
        }
        self.stats.advance_tick();

        if self.clearance().bottom {
            self.piece = self.piece.down();
            return CommandOutcome::Applied;
        }
        if self.piece.anchor().y() == SPAWN_ANCHOR.y() {
            info!(
                "game over after {} lines, {} pieces",
                self.stats.lines_cleared(),
                self.stats.locked_pieces()
            );
            self.phase = GamePhase::GameOver;
            return CommandOutcome::GameOver;
        }
        self.lock_and_respawn()
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// The piece generator keeps its stream, so a seeded engine stays
    /// reproducible across restarts.
    pub fn restart(&mut self) -> CommandOutcome {
        info!("restarting game");
        let piece = Piece::new(self.generator.next_kind());
        *self = Self {
            stats: GameStats::new(self.config.initial_speed),
            config: self.config.clone(),
            board: Board::EMPTY,
            piece,
            phase: GamePhase::Falling,
            generator: self.generator.clone(),
        };
        CommandOutcome::Applied
    }

    /// Moves the piece one cell if the board leaves room for it.
    fn shift(&mut self, direction: Direction) -> CommandOutcome {
        if self.is_game_over() {
            return CommandOutcome::Ignored;
        }
        if !self.clearance().towards(direction) {
            trace!("{direction:?} shift blocked at {:?}", self.piece.anchor());
            return CommandOutcome::Blocked;
        }
        self.piece = match direction {
            Direction::Left => self.piece.left(),
            Direction::Right => self.piece.right(),
            Direction::Down => self.piece.down(),
        };
        CommandOutcome::Applied
    }

    fn lock_and_respawn(&mut self) -> CommandOutcome {
        if let Err(err) = self.board.lock_cells(self.piece.cells()) {
            error!("cannot lock {:?}: {err}", self.piece);
            self.phase = GamePhase::GameOver;
            return CommandOutcome::GameOver;
        }
        let cleared = self.board.clear_lines();
        self.stats.complete_lock(cleared);
        if cleared > 0 {
            info!(
                "cleared {cleared} line(s), total {}, speed {}",
                self.stats.lines_cleared(),
                self.stats.speed()
            );
        }

        let locked = self.piece;
        self.piece = Piece::new(self.generator.next_kind());
        debug!(
            "locked {:?} at {:?}, spawned {:?}",
            locked.kind(),
            locked.anchor(),
            self.piece.kind()
        );
        CommandOutcome::Locked { cleared }
    }
}
