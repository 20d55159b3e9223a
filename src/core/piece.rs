//! Piece identification and positions.
//!
//! Every match has the same fourteen pieces. Their ids never change:
//!
//! - `0..7`: light pieces
//! - `7..14`: dark pieces
//!
//! ## Usage
//!
//! ```
//! use royal_ur::core::{PieceId, Position, Side};
//!
//! let piece = PieceId::new(8);
//! assert_eq!(piece.owner(), Some(Side::Dark));
//!
//! assert_eq!(Position::from_index(-1), Some(Position::Reserve));
//! assert_eq!(Position::from_index(14), Some(Position::Finished));
//! assert_eq!(Position::Path(5).index(), 5);
//! ```

use serde::{Deserialize, Serialize};

use super::config::{FINISH_INDEX, PIECES_PER_SIDE, RESERVE_INDEX, TOTAL_PIECES};
use super::player::Side;

/// Stable identifier of one of the fourteen pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create a piece ID. Ids outside `0..14` are accepted but name no piece.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index into the piece collection.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The side owning this piece, or `None` for an out-of-range id.
    #[must_use]
    pub const fn owner(self) -> Option<Side> {
        let index = self.index();
        if index < PIECES_PER_SIDE {
            Some(Side::Light)
        } else if index < TOTAL_PIECES {
            Some(Side::Dark)
        } else {
            None
        }
    }

    /// Iterate over the pieces of one side.
    pub fn of_side(side: Side) -> impl Iterator<Item = PieceId> {
        let start = side.index() * PIECES_PER_SIDE;
        (start..start + PIECES_PER_SIDE).map(|i| PieceId(i as u8))
    }

    /// Iterate over every piece id.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..TOTAL_PIECES).map(|i| PieceId(i as u8))
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece {}", self.0)
    }
}

/// Where a piece is along its owner's path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Not yet entered (index -1).
    #[default]
    Reserve,
    /// On the board at a path index in `0..=13`.
    Path(u8),
    /// Borne off (index 14).
    Finished,
}

impl Position {
    /// Parse the integer form. Returns `None` outside `-1..=14`.
    #[must_use]
    pub fn from_index(index: i8) -> Option<Self> {
        match index {
            RESERVE_INDEX => Some(Position::Reserve),
            FINISH_INDEX => Some(Position::Finished),
            i if (0..FINISH_INDEX).contains(&i) => Some(Position::Path(i as u8)),
            _ => None,
        }
    }

    /// Integer form: -1 for reserve, path index, or 14 for finished.
    #[must_use]
    pub const fn index(self) -> i8 {
        match self {
            Position::Reserve => RESERVE_INDEX,
            Position::Path(i) => i as i8,
            Position::Finished => FINISH_INDEX,
        }
    }

    /// Path index if the piece is on the board.
    #[must_use]
    pub const fn path_index(self) -> Option<u8> {
        match self {
            Position::Path(i) => Some(i),
            _ => None,
        }
    }

    /// Check if the piece is on the board.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        matches!(self, Position::Path(_))
    }
}

/// A single piece and its current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Stable identity.
    pub id: PieceId,

    /// Owning side.
    pub owner: Side,

    /// Position along the owner's path.
    pub position: Position,
}

impl Piece {
    /// Create a piece in reserve.
    #[must_use]
    pub const fn new(id: PieceId, owner: Side) -> Self {
        Self {
            id,
            owner,
            position: Position::Reserve,
        }
    }

    /// Check if the piece has been borne off.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.position, Position::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_id_owner() {
        assert_eq!(PieceId::new(0).owner(), Some(Side::Light));
        assert_eq!(PieceId::new(6).owner(), Some(Side::Light));
        assert_eq!(PieceId::new(7).owner(), Some(Side::Dark));
        assert_eq!(PieceId::new(13).owner(), Some(Side::Dark));
        assert_eq!(PieceId::new(14).owner(), None);
    }

    #[test]
    fn test_piece_id_of_side() {
        let dark: Vec<_> = PieceId::of_side(Side::Dark).collect();
        assert_eq!(dark.len(), 7);
        assert_eq!(dark[0], PieceId::new(7));
        assert_eq!(dark[6], PieceId::new(13));
        assert_eq!(PieceId::all().count(), 14);
    }

    #[test]
    fn test_position_index_roundtrip_bounds() {
        for index in -1..=14 {
            let pos = Position::from_index(index).unwrap();
            assert_eq!(pos.index(), index);
        }
        assert_eq!(Position::from_index(-2), None);
        assert_eq!(Position::from_index(15), None);
    }

    #[test]
    fn test_position_queries() {
        assert!(!Position::Reserve.is_on_board());
        assert!(Position::Path(0).is_on_board());
        assert!(!Position::Finished.is_on_board());
        assert_eq!(Position::Path(9).path_index(), Some(9));
        assert_eq!(Position::Finished.path_index(), None);
    }

    #[test]
    fn test_piece_finished() {
        let mut piece = Piece::new(PieceId::new(3), Side::Light);
        assert!(!piece.is_finished());

        piece.position = Position::Finished;
        assert!(piece.is_finished());
    }
}
