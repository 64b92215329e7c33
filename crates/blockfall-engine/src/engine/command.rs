use serde::{Deserialize, Serialize};

/// Discrete inputs accepted by [`GameEngine::apply`](crate::GameEngine::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Tick,
    Restart,
}

impl Command {
    /// Commands a player can issue; excludes the timer-driven [`Command::Tick`]
    /// and [`Command::Restart`].
    pub const PLAYER_MOVES: [Self; 5] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
    ];
}

/// What a command did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommandOutcome {
    /// The piece moved, rotated or fell one row; or the game was restarted.
    Applied,
    /// A boundary or locked cell prevented the command; nothing changed.
    Blocked,
    /// The piece was locked, `cleared` rows were removed and a new piece spawned.
    Locked { cleared: usize },
    /// This command ended the game.
    GameOver,
    /// The game is already over; nothing changed.
    Ignored,
}
