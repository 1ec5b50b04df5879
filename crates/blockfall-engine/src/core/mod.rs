//! Grid and piece primitives.
//!
//! - [`Piece`] - a tetromino with origin, shape matrix, and rotation state
//! - [`Playfield`] - the grid of placed blocks and its collision rules

pub use self::{piece::*, playfield::*};

pub(crate) mod piece;
pub(crate) mod playfield;
