use std::iter;

use blockfall_engine::{Block, GameSnapshot, PARTICLE_CELL_SIZE, Particle, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{BlockDisplay, style};

/// The playfield with the falling piece, its landing preview, clear
/// flashing, and particles.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a GameSnapshot,
    show_ghost: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            show_ghost: true,
            block: None,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        cells_u16(self.snapshot.width) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        cells_u16(self.snapshot.height) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_displays(&self) -> Vec<Vec<BlockDisplay>> {
        let snapshot = self.snapshot;
        let mut cells: Vec<Vec<_>> = snapshot
            .grid
            .iter()
            .enumerate()
            .map(|(y, row)| {
                let clearing = snapshot.is_clearing_row(y);
                row.iter()
                    .map(|&block| match block {
                        Block::Filled(color) if clearing => {
                            BlockDisplay::clearing(color, snapshot.clear_progress)
                        }
                        _ => BlockDisplay::from_block(block, true),
                    })
                    .collect()
            })
            .collect();

        if self.show_ghost
            && let Some(ghost) = &snapshot.ghost_piece
        {
            for (x, y) in visible_cells(ghost, snapshot) {
                if snapshot.grid[y][x].is_empty() {
                    cells[y][x] = BlockDisplay::ghost();
                }
            }
        }
        if let Some(piece) = &snapshot.falling_piece {
            for (x, y) in visible_cells(piece, snapshot) {
                cells[y][x] = BlockDisplay::piece(piece.color());
            }
        }
        cells
    }
}

fn cells_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Cells of `piece` inside the field; rows above the top are skipped.
fn visible_cells<'a>(
    piece: &'a Piece,
    snapshot: &'a GameSnapshot,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    piece.occupied_positions().filter_map(|(x, y)| {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < snapshot.width && y < snapshot.height).then_some((x, y))
    })
}

/// Maps a particle to the board cell under it, if any.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn particle_cell(particle: &Particle, width: usize, height: usize) -> Option<(usize, usize)> {
    let x = (particle.x / PARTICLE_CELL_SIZE).floor();
    let y = (particle.y / PARTICLE_CELL_SIZE).floor();
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    (x < width && y < height).then_some((x, y))
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let snapshot = self.snapshot;

        let col_constraints =
            (0..snapshot.width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..snapshot.height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells: Vec<Vec<Rect>> = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal))
            .collect();

        for (grid_row, row) in iter::zip(&grid_cells, self.cell_displays()) {
            for (grid_cell, block_display) in iter::zip(grid_row, row) {
                block_display.render(*grid_cell, buf);
            }
        }

        for particle in &snapshot.particles {
            let Some((x, y)) = particle_cell(particle, snapshot.width, snapshot.height) else {
                continue;
            };
            let Some(grid_cell) = grid_cells.get(y).and_then(|row| row.get(x)) else {
                continue;
            };
            let symbol = if particle.size >= 6 { "*" } else { "·" };
            let mut particle_style = style::DEFAULT.fg(style::block_color(particle.color));
            if particle.life < 0.5 {
                particle_style = particle_style.add_modifier(Modifier::DIM);
            }
            if let Some(cell) = buf.cell_mut(grid_cell.as_position()) {
                cell.set_symbol(symbol).set_style(particle_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{BlockColor, GameSeed, GameSession};

    use super::*;

    fn particle(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            life: 1.0,
            color: BlockColor::Red,
            size: 4,
        }
    }

    #[test]
    fn test_particle_cell() {
        assert_eq!(particle_cell(&particle(45.0, 575.0), 10, 20), Some((1, 19)));
        assert_eq!(particle_cell(&particle(-1.0, 10.0), 10, 20), None);
        assert_eq!(particle_cell(&particle(300.0, 10.0), 10, 20), None);
        assert_eq!(particle_cell(&particle(10.0, 600.0), 10, 20), None);
    }

    #[test]
    fn test_size_includes_border() {
        let seed: GameSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let snapshot = GameSession::with_seed(seed).snapshot();
        let board = BoardDisplay::new(&snapshot).block(BlockWidget::bordered());
        assert_eq!(board.width(), 22);
        assert_eq!(board.height(), 22);
    }

    #[test]
    fn test_falling_piece_drawn_over_ghost() {
        let seed: GameSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let snapshot = GameSession::with_seed(seed).snapshot();
        let piece = snapshot.falling_piece.clone().unwrap();
        let cells = BoardDisplay::new(&snapshot).cell_displays();

        for (x, y) in visible_cells(&piece, &snapshot) {
            assert_eq!(cells[y][x], BlockDisplay::piece(piece.color()));
        }
        assert!(cells[19].contains(&BlockDisplay::ghost()));

        let without_ghost = BoardDisplay::new(&snapshot)
            .show_ghost(false)
            .cell_displays();
        assert!(!without_ghost[19].contains(&BlockDisplay::ghost()));
    }
}
