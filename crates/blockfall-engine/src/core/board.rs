use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LockError;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 15;
/// Number of cells on the board (`BOARD_WIDTH * BOARD_HEIGHT`).
pub const BOARD_LEN: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Filled = 1,
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Binary value of the cell: `0` when empty, `1` when filled.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// The playfield as a flat sequence of cells.
///
/// Row `r`, column `c` lives at index `r * BOARD_WIDTH + c`. The length is
/// fixed by the type, so every board has exactly `BOARD_LEN` cells.
///
/// # Example
///
/// ```
/// use blockfall_engine::{BOARD_WIDTH, Board};
///
/// let mut board = Board::from_ascii(
///     "
///     ###########
///     #.........
///     ",
/// );
/// assert_eq!(board.clear_lines(), 1);
/// assert!(board.rows().take(13).all(|row| row.iter().all(|c| c.is_empty())));
/// assert!(!board.cell(14 * BOARD_WIDTH).is_empty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_LEN],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_string()).finish()
    }
}

/// Rows joined by `/`, one `0`/`1` character per cell, top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_str("/")?;
            }
            for cell in row {
                write!(f, "{}", cell.value())?;
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_HEIGHT} '/'-separated rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::EMPTY;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "row {y} must have {BOARD_WIDTH} cells, got '{row}'"
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                board.cells[y * BOARD_WIDTH + x] = match ch {
                    '0' => Cell::Empty,
                    '1' => Cell::Filled,
                    _ => {
                        return Err(serde::de::Error::custom(format!(
                            "invalid cell '{ch}' at row {y}, column {x}"
                        )));
                    }
                };
            }
        }
        Ok(board)
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; BOARD_LEN],
    };

    #[must_use]
    pub fn cells(&self) -> &[Cell; BOARD_LEN] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Returns the cell at a signed index, or `None` off the board.
    #[must_use]
    pub fn get(&self, index: isize) -> Option<Cell> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i).copied())
    }

    /// Binary values of every cell, row-major.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().map(|cell| cell.value())
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Marks the given cells as filled.
    ///
    /// Every target must be on the board and empty. All of them are checked
    /// before anything is written, so a failed lock leaves the board
    /// untouched.
    pub fn lock_cells(&mut self, cells: [isize; 4]) -> Result<(), LockError> {
        let mut indices = [0; 4];
        for (slot, index) in indices.iter_mut().zip(cells) {
            let i = usize::try_from(index)
                .ok()
                .filter(|&i| i < BOARD_LEN)
                .ok_or(LockError::OutOfBounds { index })?;
            if !self.cells[i].is_empty() {
                return Err(LockError::Occupied { index: i });
            }
            *slot = i;
        }
        for index in indices {
            self.cells[index] = Cell::Filled;
        }
        Ok(())
    }

    /// Removes full rows and drops the rows above them, returning how many
    /// rows were removed.
    ///
    /// A row is full when every one of its cells is filled. Everything else,
    /// empty rows included, is kept in order. The board is topped back up to
    /// `BOARD_HEIGHT` rows with empty rows.
    pub fn clear_lines(&mut self) -> usize {
        let mut next = [Cell::Empty; BOARD_LEN];
        let mut bottom = BOARD_HEIGHT;
        for row in self.cells.chunks_exact(BOARD_WIDTH).rev() {
            if is_full_row(row) {
                continue;
            }
            bottom -= 1;
            next[bottom * BOARD_WIDTH..][..BOARD_WIDTH].copy_from_slice(row);
        }
        self.cells = next;
        // rows above `bottom` are the empty rows that replaced the cleared ones
        bottom
    }

    /// Creates a board from ASCII art for tests and examples.
    ///
    /// `#` is a filled cell and `.` an empty one. Rows are aligned to the
    /// bottom of the board, so a two-line picture describes the last two rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "at most {BOARD_HEIGHT} rows, got {}",
            lines.len()
        );

        let mut board = Self::EMPTY;
        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.cells[(top + i) * BOARD_WIDTH + x] = Cell::Filled;
                }
            }
        }
        board
    }
}

/// A row is full when its cell values sum to the board width.
fn is_full_row(row: &[Cell]) -> bool {
    row.iter().map(|cell| usize::from(cell.value())).sum::<usize>() == BOARD_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: usize) {
        board.cells[y * BOARD_WIDTH..][..BOARD_WIDTH].fill(Cell::Filled);
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.cells().len(), BOARD_LEN);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        assert!(board.values().all(|v| v == 0));
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::EMPTY;
        assert_eq!(board.get(-1), None);
        assert_eq!(board.get(BOARD_LEN as isize), None);
        assert_eq!(board.get(0), Some(Cell::Empty));
    }

    #[test]
    fn test_lock_cells() {
        let mut board = Board::EMPTY;
        board.lock_cells([143, 144, 145, 146]).unwrap();
        assert_eq!(board.filled_count(), 4);
        assert_eq!(board.cell(144), Cell::Filled);
    }

    #[test]
    fn test_lock_cells_out_of_bounds_leaves_board_untouched() {
        let mut board = Board::EMPTY;
        let result = board.lock_cells([140, 141, 150, 151]);
        assert_eq!(result, Err(LockError::OutOfBounds { index: 150 }));
        assert_eq!(board, Board::EMPTY);

        let result = board.lock_cells([-1, 0, 1, 2]);
        assert_eq!(result, Err(LockError::OutOfBounds { index: -1 }));
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_lock_cells_onto_filled_cell_leaves_board_untouched() {
        let mut board = Board::from_ascii("....#.....");
        let before = board.clone();
        let result = board.lock_cells([134, 133, 135, 144]);
        assert_eq!(result, Err(LockError::Occupied { index: 144 }));
        assert_eq!(board, before);
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_lines_keeps_partial_rows() {
        let mut board = Board::from_ascii("#########.");
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board.filled_count(), 9);
    }

    #[test]
    fn test_clear_lines_shifts_rows_down() {
        let mut board = Board::from_ascii(
            "
            #.........
            ##########
            .#........
            ##########
            ",
        );
        assert_eq!(board.clear_lines(), 2);
        let expected = Board::from_ascii(
            "
            #.........
            .#........
            ",
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_lines_every_count() {
        for k in 0..=BOARD_HEIGHT {
            let mut board = Board::EMPTY;
            for y in BOARD_HEIGHT - k..BOARD_HEIGHT {
                fill_row(&mut board, y);
            }
            // an incomplete marker row just above the full ones
            if k < BOARD_HEIGHT {
                board.cells[(BOARD_HEIGHT - k - 1) * BOARD_WIDTH] = Cell::Filled;
            }

            assert_eq!(board.clear_lines(), k);
            assert_eq!(board.cells().len(), BOARD_LEN);
            if k < BOARD_HEIGHT {
                assert_eq!(board.filled_count(), 1);
                assert_eq!(board.cell((BOARD_HEIGHT - 1) * BOARD_WIDTH), Cell::Filled);
            } else {
                assert_eq!(board, Board::EMPTY);
            }
        }
    }

    #[test]
    fn test_clear_lines_keeps_empty_rows() {
        let mut board = Board::EMPTY;
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii("##........");
        let serialized = serde_json::to_string(&board).unwrap();
        let expected_last_row = "1100000000";
        assert!(serialized.ends_with(&format!("/{expected_last_row}\"")));
        assert!(serialized.starts_with("\"0000000000/"));

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_deserialization_error_cases() {
        assert!(serde_json::from_str::<Board>("\"0000000000\"").is_err());
        let bad_cell = ["0000000002"; BOARD_HEIGHT].join("/");
        assert!(serde_json::from_str::<Board>(&format!("\"{bad_cell}\"")).is_err());
        let short_row = ["000000000"; BOARD_HEIGHT].join("/");
        assert!(serde_json::from_str::<Board>(&format!("\"{short_row}\"")).is_err());
    }

    #[test]
    fn test_from_ascii_aligns_to_bottom() {
        let board = Board::from_ascii("#.........");
        assert_eq!(board.cell((BOARD_HEIGHT - 1) * BOARD_WIDTH), Cell::Filled);
        assert_eq!(board.filled_count(), 1);
    }
}
