use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 165, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);
    pub const GRID: Color = Color::Rgb(40, 40, 40);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::BlockColor;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRID, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);

    pub const CLEAR_WHITE: Style = bg_only(color::WHITE);
    pub const CLEAR_YELLOW: Style = bg_only(color::YELLOW);
    pub const CLEAR_RED: Style = bg_only(color::RED);

    pub const fn block_color(color: BlockColor) -> Color {
        match color {
            BlockColor::Cyan => color::CYAN,
            BlockColor::Yellow => color::YELLOW,
            BlockColor::Magenta => color::MAGENTA,
            BlockColor::Orange => color::ORANGE,
            BlockColor::Blue => color::BLUE,
            BlockColor::Green => color::GREEN,
            BlockColor::Red => color::RED,
        }
    }

    pub const fn block(color: BlockColor) -> Style {
        bg_only(block_color(color))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

#[cfg(test)]
mod tests {
    use blockfall_engine::BlockColor;
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn test_block_colors() {
        assert_eq!(
            style::block_color(BlockColor::Magenta),
            Color::Rgb(255, 0, 255)
        );
        assert_eq!(style::block_color(BlockColor::Orange), Color::Rgb(255, 165, 0));
    }

    #[test]
    fn test_block_margins() {
        assert_eq!(block_horizontal_margin(None), 0);
        assert_eq!(block_vertical_margin(Some(&BlockWidget::bordered())), 2);
    }
}
