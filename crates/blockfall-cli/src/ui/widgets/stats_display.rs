use std::iter;

use blockfall_engine::GameSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

pub struct StatsDisplay<'a> {
    snapshot: &'a GameSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
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

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(fn(&GameSnapshot) -> String),
    LabelValue(&'static str, fn(&GameSnapshot) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(|s| s.score.to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", |s| s.level.to_string()),
    Row::LabelValue("LINES:", |s| s.cleared_lines.to_string()),
    Row::LabelValue("PIECES:", |s| s.completed_pieces.to_string()),
    Row::Empty,
    Row::FullLabel("RANDOM BLOCKS:"),
    Row::FullValue(random_blocks_status),
];

fn random_blocks_status(snapshot: &GameSnapshot) -> String {
    if snapshot.random_blocks_enabled {
        format!("ON {}s", snapshot.random_block_remaining.as_secs())
    } else {
        "OFF".to_owned()
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{GameSeed, GameSession};

    use super::*;

    #[test]
    fn test_random_blocks_status() {
        let seed: GameSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
        let mut snapshot = GameSession::with_seed(seed).snapshot();
        assert_eq!(random_blocks_status(&snapshot), "OFF");

        snapshot.random_blocks_enabled = true;
        snapshot.random_block_remaining = Duration::from_millis(12_700);
        assert_eq!(random_blocks_status(&snapshot), "ON 12s");
    }
}
