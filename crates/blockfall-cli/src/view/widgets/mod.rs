use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, game_over_display::*, key_binding_display::*, stats_display::*,
};

mod board_display;
mod game_over_display;
mod key_binding_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const SILVER: Color = Color::Rgb(190, 190, 190);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const LOCKED: Style = bg_only(color::SILVER);
    pub const GAME_OVER: Style = fg_bg(color::RED, color::BLACK).add_modifier(Modifier::BOLD);

    /// Fill style of the falling piece.
    #[must_use]
    pub const fn piece(kind: PieceKind) -> Style {
        match kind {
            PieceKind::I => bg_only(color::CYAN),
            PieceKind::O => bg_only(color::YELLOW),
            PieceKind::T => bg_only(color::MAGENTA),
            PieceKind::S => bg_only(color::GREEN),
            PieceKind::Z => bg_only(color::RED),
            PieceKind::J => bg_only(color::BLUE),
            PieceKind::L => bg_only(color::ORANGE),
        }
    }
}

/// Rows taken by the borders and padding of `block`.
fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    probe.height - block.map_or(probe, |block| block.inner(probe)).height
}

/// Columns taken by the borders and padding of `block`.
fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    probe.width - block.map_or(probe, |block| block.inner(probe)).width
}
