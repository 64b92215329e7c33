use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Board, GameStats, Piece};

/// Read-only copy of the game state for presentation.
///
/// Holding a snapshot never affects the engine; take a new one after each
/// command to observe the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Locked cells only; the falling piece is not written into the board.
    pub board: Board,
    /// Board indices covered by the falling piece. Cells pushed off the board
    /// by a permissive rotation are left out.
    pub active_cells: ArrayVec<usize, 4>,
    pub piece: Piece,
    pub stats: GameStats,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Whether `index` is covered by a locked cell or by the falling piece.
    #[must_use]
    pub fn is_occupied(&self, index: usize) -> bool {
        !self.board.cell(index).is_empty() || self.active_cells.contains(&index)
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.stats.lines_cleared()
    }
}
