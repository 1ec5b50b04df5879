use std::collections::VecDeque;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::Serialize;

use super::piece::Piece;

/// Color tag of a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockColor {
    Cyan,
    Yellow,
    Magenta,
    Orange,
    Blue,
    Green,
    Red,
}

impl BlockColor {
    pub const ALL: [BlockColor; 7] = [
        BlockColor::Cyan,
        BlockColor::Yellow,
        BlockColor::Magenta,
        BlockColor::Orange,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Red,
    ];
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        BlockColor::ALL[rng.random_range(0..BlockColor::ALL.len())]
    }
}

/// A single cell of the playfield.
///
/// Emptiness is its own variant, so no color value doubles as the
/// "nothing here" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, derive_more::IsVariant)]
pub enum Block {
    #[default]
    Empty,
    Filled(BlockColor),
}

/// The grid of placed blocks.
///
/// Row 0 is the top of the visible field. Every write is bounds-checked, so
/// no cell outside `[0, width) × [0, height)` is ever touched.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind, Playfield};
///
/// let mut field = Playfield::new(10, 20);
/// let piece = field.drop_position(&Piece::spawn(PieceKind::I, 10));
/// assert_eq!(piece.position(), (4, 19));
///
/// field.fill_piece(&piece);
/// assert!(field.full_rows().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    rows: VecDeque<Vec<Block>>,
}

impl Playfield {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: (0..height).map(|_| vec![Block::Empty; width]).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Returns the block at `(x, y)`, or `None` outside the field.
    #[must_use]
    pub fn block_at(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Sets the block at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the field.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of field");
        self.rows[y][x] = block;
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.height)?;
        Some((x, y))
    }

    /// Returns whether every cell of `piece` is inside the field and unoccupied.
    ///
    /// Cells above the field (`y < 0`) only need to be within the side walls;
    /// they are never checked for occupancy, which lets pieces spawn partially
    /// above the visible area.
    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        piece.occupied_positions().all(|(x, y)| {
            if x < 0 || x >= width || y >= height {
                return false;
            }
            match self.cell_index(x, y) {
                Some((x, y)) => self.rows[y][x].is_empty(),
                None => true,
            }
        })
    }

    /// Writes the piece's color into every occupied cell inside the field.
    ///
    /// Cells outside the field (e.g. above the top row) are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let block = Block::Filled(piece.color());
        for (x, y) in piece.occupied_positions() {
            if let Some((x, y)) = self.cell_index(x, y) {
                self.rows[y][x] = block;
            }
        }
    }

    /// Returns the indices of completely filled rows, top to bottom.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|b| b.is_filled()))
            .map(|(y, _)| y)
            .collect()
    }

    /// Removes the listed rows and inserts the same number of empty rows at the top.
    ///
    /// Rows above a removed row shift down by one for each removed row below
    /// them. Duplicate and out-of-range indices are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut rows = rows
            .iter()
            .copied()
            .filter(|y| *y < self.height)
            .collect::<Vec<_>>();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows.dedup();

        // descending order keeps the remaining indices valid
        for y in &rows {
            self.rows.remove(*y);
        }
        for _ in &rows {
            self.rows.push_front(vec![Block::Empty; self.width]);
        }
    }

    /// Returns the row index of the highest filled cell in column `x`,
    /// or the field height if the column is empty.
    #[must_use]
    pub fn column_top(&self, x: usize) -> usize {
        self.rows
            .iter()
            .position(|row| row.get(x).is_some_and(|b| b.is_filled()))
            .unwrap_or(self.height)
    }

    /// Returns the cells directly above each column's stack.
    ///
    /// Columns filled up to row 0 have no such cell and are skipped.
    pub fn stack_landing_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width).filter_map(|x| {
            let top = self.column_top(x);
            (top > 0).then(|| (x, top - 1))
        })
    }

    /// Returns the deepest valid position reachable by moving `piece` straight down.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut dropped = piece.clone();
        loop {
            let next = dropped.moved(0, 1);
            if !self.is_valid_position(&next) {
                return dropped;
            }
            dropped = next;
        }
    }
}
