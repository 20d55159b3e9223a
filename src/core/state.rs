//! Match state and its read-only snapshot.
//!
//! ## MatchState
//!
//! The single aggregate owned by the engine:
//! - Piece positions
//! - Side to act, last dice thrown
//! - Turn phase (awaiting roll, awaiting move, game over)
//! - Action history
//!
//! ## MatchSnapshot
//!
//! A flat, serializable view of the state for presentation code.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::action::{Action, ActionRecord};
use super::config::{PIECES_PER_SIDE, TOTAL_PIECES};
use super::dice::Dice;
use super::piece::{Piece, PieceId, Position};
use super::player::{Side, SideMap};
use crate::rules::{location, Cell};

/// Pieces movable with the current roll. Never more than one side's pieces.
pub type MovableSet = SmallVec<[PieceId; PIECES_PER_SIDE]>;

/// Where the match is in its turn cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The current side must roll.
    AwaitingRoll,
    /// Dice are thrown; the current side must move one of `movable`.
    ///
    /// An empty set means the side cannot move and the caller has to pass
    /// the turn.
    AwaitingMove {
        /// Pieces with a legal move for the thrown dice.
        movable: MovableSet,
    },
    /// A side has borne off all its pieces.
    GameOver {
        /// The side that won.
        winner: Side,
    },
}

/// Errors from setting up a position by hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("{0} does not exist")]
    UnknownPiece(PieceId),
    #[error("{0:?} is past the end of the path")]
    OffBoard(Position),
    #[error("the match is over, {0} won")]
    GameOver(Side),
    #[error("placing {0} would bear off every piece of its side")]
    AllFinished(PieceId),
    #[error("{cell} is already occupied by {occupant}")]
    Occupied {
        /// Cell the piece would land on.
        cell: Cell,
        /// Piece already there.
        occupant: PieceId,
    },
}

/// Complete state of one match.
///
/// Uses an `im` vector for history so cloning a state stays O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pieces: [Piece; TOTAL_PIECES],
    current_player: Side,
    dice: Dice,
    phase: TurnPhase,
    turn_number: u32,
    action_sequence: u32,
    history: Vector<ActionRecord>,
}

impl MatchState {
    /// Create the start-of-match configuration.
    ///
    /// ## Defaults
    ///
    /// - every piece in reserve
    /// - `phase`: `AwaitingRoll`
    /// - `turn_number`: 1
    #[must_use]
    pub fn new(starting_side: Side) -> Self {
        let pieces = std::array::from_fn(|i| {
            let id = PieceId::new(i as u8);
            let owner = if i < PIECES_PER_SIDE { Side::Light } else { Side::Dark };
            Piece::new(id, owner)
        });

        Self {
            pieces,
            current_player: starting_side,
            dice: Dice::ZERO,
            phase: TurnPhase::AwaitingRoll,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
        }
    }

    // === Pieces ===

    /// All fourteen pieces, indexed by `PieceId`.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Get a piece by ID.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Pieces owned by a side.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.owner == side)
    }

    /// Number of borne-off pieces for a side.
    #[must_use]
    pub fn finished_count(&self, side: Side) -> usize {
        self.pieces_of(side).filter(|p| p.is_finished()).count()
    }

    /// Finished counts for both sides.
    #[must_use]
    pub fn finished_counts(&self) -> SideMap<usize> {
        SideMap::new(|side| self.finished_count(side))
    }

    /// Board cell a piece stands on, if it is on the board.
    #[must_use]
    pub fn cell_of(&self, id: PieceId) -> Option<Cell> {
        let piece = self.piece(id)?;
        location(piece.owner, piece.position.path_index()?)
    }

    /// The piece standing on a cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<PieceId> {
        self.pieces
            .iter()
            .find(|p| self.cell_of(p.id) == Some(cell))
            .map(|p| p.id)
    }

    // === Turn ===

    /// Side whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Side {
        self.current_player
    }

    /// Dice from the last throw (all zero after a turn switch).
    #[must_use]
    pub fn dice(&self) -> Dice {
        self.dice
    }

    /// Sum of the last throw.
    #[must_use]
    pub fn last_roll(&self) -> u8 {
        self.dice.sum()
    }

    /// Current turn phase.
    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Check if the current side must roll before moving.
    #[must_use]
    pub fn waiting_for_roll(&self) -> bool {
        matches!(self.phase, TurnPhase::AwaitingRoll)
    }

    /// Pieces legally movable with the last roll.
    #[must_use]
    pub fn possible_moves(&self) -> &[PieceId] {
        match &self.phase {
            TurnPhase::AwaitingMove { movable } => movable.as_slice(),
            _ => &[],
        }
    }

    /// Check if a piece is movable with the last roll.
    #[must_use]
    pub fn is_movable(&self, id: PieceId) -> bool {
        self.possible_moves().contains(&id)
    }

    /// Check if the dice are thrown but no piece can move.
    ///
    /// The engine never passes on its own; callers seeing this should
    /// call `switch_turn`.
    #[must_use]
    pub fn must_pass(&self) -> bool {
        matches!(&self.phase, TurnPhase::AwaitingMove { movable } if movable.is_empty())
    }

    /// The winning side once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Check if the match is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Turn number (starts at 1, increments on every side switch).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Accepted actions in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Setup ===

    /// Put a piece at a position, for building puzzles and test positions.
    ///
    /// Leaves the state awaiting a roll from the current side. A finished
    /// match cannot be edited, and a side can only reach seven finished
    /// pieces by moving.
    pub fn place_piece(&mut self, id: PieceId, position: Position) -> Result<(), PlacementError> {
        if let TurnPhase::GameOver { winner } = self.phase {
            return Err(PlacementError::GameOver(winner));
        }
        let piece = *self.piece(id).ok_or(PlacementError::UnknownPiece(id))?;

        if position == Position::Finished
            && !piece.is_finished()
            && self.finished_count(piece.owner) + 1 >= PIECES_PER_SIDE
        {
            return Err(PlacementError::AllFinished(id));
        }

        if let Some(index) = position.path_index() {
            let cell = location(piece.owner, index).ok_or(PlacementError::OffBoard(position))?;
            if let Some(occupant) = self.occupant(cell).filter(|&o| o != id) {
                return Err(PlacementError::Occupied { cell, occupant });
            }
        }

        self.pieces[id.index()].position = position;
        self.phase = TurnPhase::AwaitingRoll;
        Ok(())
    }

    // === Engine mutation ===

    pub(crate) fn set_position(&mut self, id: PieceId, position: Position) {
        self.pieces[id.index()].position = position;
    }

    pub(crate) fn set_dice(&mut self, dice: Dice) {
        self.dice = dice;
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    /// Hand the turn to the other side, clearing the dice.
    pub(crate) fn pass_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.dice = Dice::ZERO;
        self.phase = TurnPhase::AwaitingRoll;
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Record an action taken by the current side.
    pub(crate) fn record(&mut self, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(self.current_player, action, self.turn_number, sequence));
    }

    // === Snapshot ===

    /// Flat read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            pieces: self
                .pieces
                .iter()
                .map(|p| PieceSnapshot {
                    id: p.id,
                    owner: p.owner,
                    position: p.position.index(),
                    is_finished: p.is_finished(),
                })
                .collect(),
            current_player: self.current_player,
            dice: self.dice.values(),
            last_roll: self.last_roll(),
            waiting_for_roll: self.waiting_for_roll(),
            possible_moves: self.possible_moves().to_vec(),
            winner: self.winner(),
        }
    }
}

/// One piece as seen by presentation code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub owner: Side,
    /// -1 in reserve, 0..=13 on the path, 14 finished.
    pub position: i8,
    pub is_finished: bool,
}

/// Read-only view of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub pieces: Vec<PieceSnapshot>,
    pub current_player: Side,
    pub dice: [u8; 4],
    pub last_roll: u8,
    pub waiting_for_roll: bool,
    pub possible_moves: Vec<PieceId>,
    pub winner: Option<Side>,
}
