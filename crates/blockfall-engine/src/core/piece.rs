use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Serialize, Serializer, ser::SerializeSeq as _};

use super::playfield::BlockColor;

/// A falling tetromino with origin, shape, and rotation state.
///
/// Pieces are immutable values: movement and rotation return new `Piece`
/// instances and never validate anything. The caller checks the candidate
/// against a [`Playfield`](super::playfield::Playfield) and only keeps it
/// when the position is valid, so a rejected move or rotation leaves the
/// original piece untouched.
///
/// # Coordinate System
///
/// - The origin is the top-left corner of the shape's bounding box
/// - X increases rightward (columns), Y increases downward (rows)
/// - Y may be negative while a piece is above the visible field
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!(piece.position(), (4, 0));
///
/// let rotated = piece.rotated_right();
/// assert_eq!(rotated.shape().width(), 2);
/// assert_eq!(rotated.shape().height(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    x: i32,
    y: i32,
    rotation: PieceRotation,
    shape: PieceShape,
}

impl Piece {
    /// Creates a piece of `kind` in its spawn orientation at `(x, y)`.
    #[must_use]
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: PieceRotation::default(),
            shape: kind.shape(),
        }
    }

    /// Creates a piece at the spawn position of a field `field_width` cells wide.
    ///
    /// The spawn position is column `field_width / 2 - 1`, row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, field_width: usize) -> Self {
        let x = i32::try_from(field_width / 2).unwrap_or(i32::MAX) - 1;
        Self::new(kind, x, 0)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn shape(&self) -> &PieceShape {
        &self.shape
    }

    /// Returns the absolute grid coordinates of every occupied cell.
    ///
    /// The iterator is recomputed from the shape and origin on each call.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_positions()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Returns a copy translated by `(dx, dy)`.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Returns a copy rotated 90° clockwise around the bounding box origin.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            shape: self.shape.rotated_right(),
            ..self.clone()
        }
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_right(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Binary occupancy matrix of a piece (at most 4×4).
///
/// Rows are stored without padding, so a horizontal I-piece is 1×4 and
/// becomes 4×1 after one rotation. Two shapes are equal only if both their
/// dimensions and their cells match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceShape {
    rows: ArrayVec<ArrayVec<bool, 4>, 4>,
}

/// Serializes as a list of row strings (e.g. `["###", ".#."]`).
impl Serialize for PieceShape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            seq.serialize_element(&line)?;
        }
        seq.end()
    }
}

impl PieceShape {
    fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, ArrayVec::len)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the cell at `(x, y)` relative to the bounding box is set.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Returns the number of set cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| **c).count()
    }

    /// Returns the set cells as offsets from the bounding box origin.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().zip(0..).flat_map(|(row, dy)| {
            row.iter()
                .zip(0..)
                .filter_map(move |(&cell, dx)| cell.then_some((dx, dy)))
        })
    }

    /// Rotates the matrix 90° clockwise: `new[c][rows - 1 - r] = old[r][c]`.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let height = self.height();
        let rows = (0..self.width())
            .map(|c| (0..height).map(|j| self.rows[height - 1 - j][c]).collect())
            .collect();
        Self { rows }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

/// Uniform selection over the seven kinds (no bag).
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the shape in spawn orientation.
    #[must_use]
    pub fn shape(self) -> PieceShape {
        let pattern: &[&str] = match self {
            PieceKind::I => &["####"],
            PieceKind::O => &["##", "##"],
            PieceKind::T => &["###", ".#."],
            PieceKind::L => &["###", "#.."],
            PieceKind::J => &["###", "..#"],
            PieceKind::S => &[".##", "##."],
            PieceKind::Z => &["##.", ".##"],
        };
        PieceShape::from_pattern(pattern)
    }

    #[must_use]
    pub const fn color(self) -> BlockColor {
        match self {
            PieceKind::I => BlockColor::Cyan,
            PieceKind::O => BlockColor::Yellow,
            PieceKind::T => BlockColor::Magenta,
            PieceKind::L => BlockColor::Orange,
            PieceKind::J => BlockColor::Blue,
            PieceKind::S => BlockColor::Red,
            PieceKind::Z => BlockColor::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn any_kind() -> impl Strategy<Value = PieceKind> {
        (0..PieceKind::LEN).prop_map(|i| PieceKind::ALL[i])
    }

    #[test]
    fn test_spawn_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().cell_count(), 4, "{kind} should have 4 cells");
        }
    }

    #[test]
    fn test_spawn_position_is_centered() {
        let piece = Piece::spawn(PieceKind::I, 10);
        assert_eq!(piece.position(), (4, 0));
        assert_eq!(piece.rotation().index(), 0);

        let piece = Piece::spawn(PieceKind::O, 7);
        assert_eq!(piece.position(), (2, 0));
    }

    #[test]
    fn test_rotate_t_piece() {
        // ###      #.
        // .#.  ->  ##
        //          #.
        let rotated = PieceKind::T.shape().rotated_right();
        assert_eq!(rotated, PieceShape::from_pattern(&[".#", "##", ".#"]));
    }

    #[test]
    fn test_rotate_l_piece() {
        // ###      ##
        // #..  ->  .#
        //          .#
        let rotated = PieceKind::L.shape().rotated_right();
        assert_eq!(rotated, PieceShape::from_pattern(&["##", ".#", ".#"]));
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let piece = Piece::spawn(PieceKind::I, 10);
        let rotated = piece.rotated_right();
        assert_eq!((rotated.shape().width(), rotated.shape().height()), (1, 4));
        assert_eq!(rotated.position(), piece.position());
        assert_eq!(rotated.rotation().index(), 1);
    }

    #[test]
    fn test_occupied_positions_are_absolute() {
        let piece = Piece::new(PieceKind::T, 3, -1);
        let cells: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(cells, vec![(3, -1), (4, -1), (5, -1), (4, 0)]);
    }

    #[test]
    fn test_occupied_positions_restartable() {
        let piece = Piece::new(PieceKind::S, 0, 0).moved(2, 5);
        let first: Vec<_> = piece.occupied_positions().collect();
        let second: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![(3, 5), (4, 5), (2, 6), (3, 6)]);
    }

    #[test]
    fn test_shape_serialization() {
        let serialized = serde_json::to_string(&PieceKind::J.shape()).unwrap();
        assert_eq!(serialized, "[\"###\",\"..#\"]");
    }

    #[test]
    fn test_skew_piece_colors() {
        // the skew whose top row leans left is green, its mirror is red
        assert_eq!(PieceKind::Z.shape(), PieceShape::from_pattern(&["##.", ".##"]));
        assert_eq!(PieceKind::Z.color(), BlockColor::Green);
        assert_eq!(PieceKind::S.shape(), PieceShape::from_pattern(&[".##", "##."]));
        assert_eq!(PieceKind::S.color(), BlockColor::Red);
    }

    proptest! {
        #[test]
        fn test_four_rotations_restore_shape(kind in any_kind(), x in -3..12i32, y in -3..22i32) {
            let piece = Piece::new(kind, x, y);
            let rotated = piece
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            prop_assert_eq!(rotated, piece);
        }

        #[test]
        fn test_rotation_preserves_cell_count(kind in any_kind(), turns in 0..4usize) {
            let mut shape = kind.shape();
            for _ in 0..turns {
                shape = shape.rotated_right();
            }
            prop_assert_eq!(shape.cell_count(), 4);
        }
    }
}
