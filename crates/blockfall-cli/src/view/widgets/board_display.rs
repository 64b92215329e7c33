use std::iter;

use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, GameSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

use crate::view::widgets::style;

/// Terminal columns per board cell.
const CELL_WIDTH: u16 = 2;

/// Locked cells and the falling piece, one board cell per two columns.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a GameSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_WIDTH as u16 * CELL_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 + super::block_vertical_margin(self.block.as_ref())
    }

    /// Style and symbol of the board cell at `index`.
    fn cell_look(&self, index: usize) -> (Style, &'static str) {
        if !self.snapshot.is_occupied(index) {
            (style::EMPTY_DOT, ".")
        } else if self.snapshot.active_cells.contains(&index) {
            (style::piece(self.snapshot.piece.kind()), "")
        } else {
            (style::LOCKED, "")
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let columns = Layout::horizontal(
            (0..BOARD_WIDTH).map(|_| Constraint::Length(CELL_WIDTH)),
        )
        .flex(Flex::Center);
        let rows = Layout::vertical((0..BOARD_HEIGHT).map(|_| Constraint::Length(1)));

        let grid = area
            .layout::<BOARD_HEIGHT>(&rows)
            .into_iter()
            .flat_map(|row| row.layout::<BOARD_WIDTH>(&columns));

        for (index, cell_area) in iter::zip(0.., grid) {
            let (style, symbol) = self.cell_look(index);
            // a Paragraph fills the whole cell, not only the symbol
            Paragraph::new(symbol)
                .style(style)
                .centered()
                .render(cell_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{
        Anchor, Board, EngineConfig, GameEngine, Orientation, Piece, PieceKind, PieceSeed,
    };

    use super::*;

    fn snapshot() -> GameSnapshot {
        let piece = Piece::with_placement(PieceKind::O, Orientation::Up, Anchor::new(0, 1));
        let board = Board::from_ascii("#.........");
        GameEngine::with_board(EngineConfig::default(), PieceSeed::from_bytes([0; 16]), board, piece)
            .snapshot()
    }

    #[test]
    fn test_renders_piece_and_locked_cells() {
        let snapshot = snapshot();
        let display = BoardDisplay::new(&snapshot);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        // O-piece covers (0, 0), (1, 0), (0, 1), (1, 1)
        assert_eq!(buf[(0, 0)].bg, style::piece(PieceKind::O).bg.unwrap());
        assert_eq!(buf[(3, 1)].bg, style::piece(PieceKind::O).bg.unwrap());
        assert_eq!(buf[(0, 14)].bg, style::LOCKED.bg.unwrap());
        assert_eq!(buf[(2, 14)].bg, style::EMPTY_DOT.bg.unwrap());
    }

    #[test]
    fn test_size_includes_block() {
        let snapshot = snapshot();
        let display = BoardDisplay::new(&snapshot);
        assert_eq!((display.width(), display.height()), (20, 15));
        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (22, 17));
    }
}
