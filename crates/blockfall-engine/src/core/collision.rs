use super::{
    board::{BOARD_HEIGHT, BOARD_WIDTH, Board},
    piece::Piece,
};

/// Direction a piece can be shifted by one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Flat index delta of a one-cell shift.
    #[expect(clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Down => BOARD_WIDTH as isize,
        }
    }

    /// Whether a shifted cell landed somewhere the shift cannot reach.
    ///
    /// A left shift out of column 0 wraps into the last column of the row
    /// above, and a right shift out of the last column wraps into column 0 of
    /// the row below. Anything off the flat range (above the top or below the
    /// last row) is out as well.
    #[expect(clippy::cast_possible_wrap)]
    fn is_out_of_bounds(self, projected: isize) -> bool {
        const WIDTH: isize = BOARD_WIDTH as isize;
        const LEN: isize = (BOARD_WIDTH * BOARD_HEIGHT) as isize;
        if !(0..LEN).contains(&projected) {
            return true;
        }
        match self {
            Direction::Left => projected % WIDTH == WIDTH - 1,
            Direction::Right => projected % WIDTH == 0,
            Direction::Down => false,
        }
    }
}

/// Which one-cell moves are open to a piece on a given board.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Anchor, Board, Clearance, Orientation, Piece, PieceKind};
///
/// // I-piece lying flat against the left wall on the bottom row.
/// let piece = Piece::with_placement(PieceKind::I, Orientation::Up, Anchor::new(1, 14));
/// let clearance = Clearance::of(&piece, &Board::EMPTY);
/// assert!(!clearance.left);
/// assert!(clearance.right);
/// assert!(!clearance.bottom);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clearance {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Clearance {
    #[must_use]
    pub fn of(piece: &Piece, board: &Board) -> Self {
        Self {
            left: is_clear(piece, board, Direction::Left),
            right: is_clear(piece, board, Direction::Right),
            bottom: is_clear(piece, board, Direction::Down),
        }
    }

    #[must_use]
    pub const fn towards(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
        }
    }
}

/// Checks whether every cell of `piece` can shift one step in `direction`.
///
/// Shifted cells that the piece already covers are skipped: a piece never
/// blocks itself. Each remaining cell must be on the board, not wrap across
/// an edge, and land on an empty cell.
#[must_use]
pub fn is_clear(piece: &Piece, board: &Board, direction: Direction) -> bool {
    let cells = piece.cells();
    cells
        .iter()
        .map(|cell| cell + direction.delta())
        .filter(|projected| !cells.contains(projected))
        .all(|projected| {
            !direction.is_out_of_bounds(projected)
                && board.get(projected).is_some_and(|cell| cell.is_empty())
        })
}

/// No shape reaches more than this many columns away from its anchor.
const MAX_COLUMN_REACH: isize = 2;

/// Checks whether `piece` can sit where it is: every cell on the board, on an
/// empty cell, and none wrapped around a side edge.
#[expect(clippy::cast_possible_wrap)]
#[must_use]
pub fn fits(piece: &Piece, board: &Board) -> bool {
    let x = piece.anchor().x();
    piece.cells().iter().all(|&cell| {
        let column = cell.rem_euclid(BOARD_WIDTH as isize);
        (column - x).abs() <= MAX_COLUMN_REACH
            && board.get(cell).is_some_and(|cell| cell.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::{Anchor, Orientation, PieceKind};

    fn piece(kind: PieceKind, orientation: Orientation, x: isize, y: isize) -> Piece {
        Piece::with_placement(kind, orientation, Anchor::new(x, y))
    }

    #[test]
    fn test_open_board_is_clear_everywhere() {
        let clearance = Clearance::of(&Piece::new(PieceKind::T), &Board::EMPTY);
        assert_eq!(
            clearance,
            Clearance {
                left: true,
                right: true,
                bottom: true,
            }
        );
    }

    #[test]
    fn test_walls_block_horizontal_moves() {
        // occupies columns 0..=3
        let at_left = piece(PieceKind::I, Orientation::Up, 1, 5);
        assert!(!is_clear(&at_left, &Board::EMPTY, Direction::Left));
        assert!(is_clear(&at_left, &Board::EMPTY, Direction::Right));

        // occupies columns 6..=9
        let at_right = piece(PieceKind::I, Orientation::Up, 7, 5);
        assert!(is_clear(&at_right, &Board::EMPTY, Direction::Left));
        assert!(!is_clear(&at_right, &Board::EMPTY, Direction::Right));
    }

    #[test]
    fn test_vertical_piece_at_walls() {
        let at_left = piece(PieceKind::I, Orientation::Left, 0, 5);
        assert!(!is_clear(&at_left, &Board::EMPTY, Direction::Left));
        let at_right = piece(PieceKind::I, Orientation::Left, 9, 5);
        assert!(!is_clear(&at_right, &Board::EMPTY, Direction::Right));
    }

    #[test]
    fn test_floor_blocks_downward_move() {
        let on_floor = piece(PieceKind::I, Orientation::Up, 4, 14);
        assert!(!is_clear(&on_floor, &Board::EMPTY, Direction::Down));
        let above_floor = piece(PieceKind::I, Orientation::Up, 4, 13);
        assert!(is_clear(&above_floor, &Board::EMPTY, Direction::Down));
    }

    #[test]
    fn test_locked_cells_block_moves() {
        let board = Board::from_ascii(
            "
            ...#......
            ..........
            ",
        );
        // T facing up at (4, 12): cells 124, 123, 125, 114
        let t = piece(PieceKind::T, Orientation::Up, 4, 12);
        assert!(!is_clear(&t, &board, Direction::Down));
        assert!(is_clear(&t, &board, Direction::Left));

        let beside = piece(PieceKind::O, Orientation::Up, 4, 13);
        assert!(!is_clear(&beside, &board, Direction::Left));
        assert!(is_clear(&beside, &board, Direction::Right));
    }

    #[test]
    fn test_own_cells_never_block() {
        // a vertical I moving down only tests the cell below its lowest block
        let vertical = piece(PieceKind::I, Orientation::Left, 4, 5);
        let mut board = Board::EMPTY;
        board.lock_cells([84, 0, 1, 2]).unwrap();
        assert!(!is_clear(&vertical, &board, Direction::Down));
        let higher = piece(PieceKind::I, Orientation::Left, 4, 4);
        assert!(is_clear(&higher, &board, Direction::Down));
    }

    #[test]
    fn test_every_cell_must_clear() {
        // only the rightmost cell of the S is obstructed
        let board = Board::from_ascii(
            "
            ......#...
            ..........
            ..........
            ",
        );
        let s = piece(PieceKind::S, Orientation::Up, 4, 13);
        assert!(is_clear(&s, &board, Direction::Left));
        assert!(!is_clear(&s, &board, Direction::Right));
    }

    #[test]
    fn test_fits() {
        let board = Board::from_ascii("....#.....");
        assert!(fits(&Piece::new(PieceKind::L), &board));
        // bottom-row I covering column 4
        assert!(!fits(&piece(PieceKind::I, Orientation::Up, 4, 14), &board));
        // vertical I hanging below the floor
        assert!(!fits(&piece(PieceKind::I, Orientation::Left, 0, 13), &board));
        // flat I poking through the left wall wraps into the row above
        assert!(!fits(&piece(PieceKind::I, Orientation::Up, 0, 5), &board));
        // I facing right keeps its cells one column right of the anchor
        assert!(fits(&piece(PieceKind::I, Orientation::Right, -1, 5), &board));
    }

    #[test]
    fn test_towards_matches_fields() {
        let clearance = Clearance {
            left: true,
            right: false,
            bottom: true,
        };
        assert!(clearance.towards(Direction::Left));
        assert!(!clearance.towards(Direction::Right));
        assert!(clearance.towards(Direction::Down));
    }
}
