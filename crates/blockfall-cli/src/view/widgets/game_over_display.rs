use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Paragraph, Widget},
};

use crate::view::widgets::style;

/// Box drawn over the board once the game has ended.
#[derive(Debug, Default)]
pub struct GameOverDisplay;

impl Widget for GameOverDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.centered(Constraint::Length(18), Constraint::Length(4));
        Clear.render(area, buf);
        let text = Text::from(vec![
            Line::styled("GAME OVER", style::GAME_OVER),
            Line::styled("R restart  Q quit", style::DEFAULT),
        ])
        .centered();
        Paragraph::new(text)
            .block(BlockWidget::bordered().style(style::GAME_OVER))
            .render(area, buf);
    }
}
