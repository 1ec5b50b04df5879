use blockfall_engine::{Block, BlockColor};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One playfield cell, drawn two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Filled(color) => Self::piece(color),
        }
    }

    pub const fn piece(color: BlockColor) -> Self {
        Self::new(style::block(color), "")
    }

    pub const fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }

    /// A filled cell in a row that is being cleared.
    ///
    /// Alternates between the block's own color and a flash color that
    /// shifts from white to yellow to red as the animation progresses.
    pub fn clearing(color: BlockColor, progress: f32) -> Self {
        match clear_flash_style(progress) {
            Some(flash) => Self::new(flash, ""),
            None => Self::piece(color),
        }
    }
}

fn clear_flash_style(progress: f32) -> Option<Style> {
    let pulse = (progress * 20.0).sin().abs();
    if pulse < 0.5 {
        return None;
    }
    let style = if progress < 0.3 {
        style::CLEAR_WHITE
    } else if progress < 0.6 {
        style::CLEAR_YELLOW
    } else {
        style::CLEAR_RED
    };
    Some(style)
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
