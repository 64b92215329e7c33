use std::{iter, time::Duration};

use blockfall_engine::GameSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

/// Side panel with the game counters.
pub struct StatsDisplay<'a> {
    snapshot: &'a GameSnapshot,
    drop_interval: Duration,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot, drop_interval: Duration) -> Self {
        Self {
            snapshot,
            drop_interval,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = fn(&StatsDisplay<'_>) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    LabelValue(&'static str, Value),
}

const ROWS: &[Row] = &[
    Row::LabelValue("LINES:", |d| d.snapshot.stats.lines_cleared().to_string()),
    Row::LabelValue("SPEED:", |d| d.snapshot.stats.speed().to_string()),
    Row::LabelValue("INTERVAL:", |d| format!("{}ms", d.drop_interval.as_millis())),
    Row::Empty,
    Row::LabelValue("TICKS:", |d| d.snapshot.stats.tick().to_string()),
    Row::LabelValue("PIECES:", |d| d.snapshot.stats.locked_pieces().to_string()),
    Row::LabelValue("FALLING:", |d| d.snapshot.piece.kind().as_char().to_string()),
    Row::Empty,
    Row::LabelValue("SINGLES:", |d| {
        d.snapshot.stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", |d| {
        d.snapshot.stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", |d| {
        d.snapshot.stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("QUADS:", |d| {
        d.snapshot.stats.line_cleared_counter()[4].to_string()
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = Layout::vertical(ROWS.iter().map(|_| Constraint::Length(1))).split(area);
        for (row, area) in iter::zip(ROWS, row_areas.iter().copied()) {
            let Row::LabelValue(label, value) = *row else {
                continue;
            };
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(&self), style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
