//! Action representation and history records.
//!
//! Every accepted engine operation is recorded as an `Action`:
//! - `Roll`: the dice that were thrown
//! - `Move`: the piece that moved
//! - `SwitchTurn`: an explicit pass (zero roll or no legal move)
//!
//! Rejected operations are never recorded.

use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::piece::PieceId;
use super::player::Side;

/// A completed engine action.
///
/// ```
/// use royal_ur::core::{Action, Dice, PieceId};
///
/// let roll = Action::Roll { dice: Dice::from_values([1, 0, 1, 0]) };
/// let mv = Action::Move { piece: PieceId::new(2) };
///
/// assert_ne!(roll, mv);
/// assert!(Action::SwitchTurn.is_pass());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    /// Dice thrown.
    Roll {
        /// The values thrown.
        dice: Dice,
    },
    /// A piece moved by the last roll.
    Move {
        /// The piece moved.
        piece: PieceId,
    },
    /// The turn passed without a move.
    SwitchTurn,
}

impl Action {
    /// Check if this action passed the turn without a move.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::SwitchTurn)
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that took this action.
    pub side: Side,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(side: Side, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        let a1 = Action::Move { piece: PieceId::new(1) };
        let a2 = Action::Move { piece: PieceId::new(1) };
        let a3 = Action::Move { piece: PieceId::new(2) };

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
        assert!(!a1.is_pass());
    }

    #[test]
    fn test_action_record() {
        let action = Action::Move { piece: PieceId::new(5) };
        let record = ActionRecord::new(Side::Dark, action, 3, 1);

        assert_eq!(record.side, Side::Dark);
        assert_eq!(record.action, action);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 1);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::Roll {
            dice: Dice::from_values([1, 1, 0, 0]),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"kind":"roll","dice":[1,1,0,0]}"#);

        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Side::Light, Action::SwitchTurn, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
