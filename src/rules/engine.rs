//! Rules of the Royal Game of Ur and the match engine that applies them.
//!
//! ## Board
//!
//! Each side walks a fourteen-square path. Path indices 0-3 and 12-13 are
//! private to the side; indices 4-11 run down the shared middle row, where
//! pieces of both sides meet and capture each other. `location` maps a
//! path index to its board cell and is the only place that knows the
//! layout.
//!
//! ## Turn
//!
//! Roll four binary dice, move one piece exactly that many squares:
//! - landing on an own piece is illegal
//! - landing on an opponent captures it, except on the safe rosette (7)
//! - bearing off needs the exact count to reach index 14
//! - landing on a rosette (3, 7, 13) grants another roll
//!
//! The free functions (`legal_moves`, `apply_roll`, `apply_move`,
//! `apply_switch`) transform a `MatchState` directly. `MatchEngine` wraps
//! them with dice, logging and the persisted win tally.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::config::{FINISH_INDEX, PIECES_PER_SIDE, ROSETTES, SAFE_ROSETTE, SHARED_END, SHARED_START};
use crate::core::{
    Action, Dice, GameRng, GameRngState, MatchConfig, MatchSnapshot, MatchState, MovableSet, Piece,
    PieceId, PlacementError, Position, Side, TurnPhase,
};
use crate::tally::{KeyValueStore, MemoryStore, WinTally};

// =============================================================================
// Board
// =============================================================================

/// A square of the board.
///
/// The board is a 3x8 grid with two gaps: dark's private row on top, the
/// shared row in the middle, light's private row at the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// A square on `side`'s private row, named by the path index landing on it.
    Private {
        /// Owner of the square.
        side: Side,
        /// Path index: 0-3 or 12-13.
        index: u8,
    },
    /// One of the eight shared squares, numbered 0..8 along the track.
    Shared(u8),
}

impl Cell {
    /// Grid coordinates as `(row, column)`.
    ///
    /// ```
    /// use royal_ur::core::Side;
    /// use royal_ur::rules::location;
    ///
    /// assert_eq!(location(Side::Light, 0).unwrap().coords(), (2, 3));
    /// assert_eq!(location(Side::Dark, 4).unwrap().coords(), (1, 0));
    /// assert_eq!(location(Side::Dark, 13).unwrap().coords(), (0, 6));
    /// ```
    #[must_use]
    pub fn coords(self) -> (u8, u8) {
        match self {
            Cell::Private { side, index } => {
                let row = match side {
                    Side::Dark => 0,
                    Side::Light => 2,
                };
                let column = if index < 4 { 3 - index } else { 19 - index };
                (row, column)
            }
            Cell::Shared(k) => (1, k),
        }
    }

    /// Check if the square is a rosette.
    #[must_use]
    pub fn is_rosette(self) -> bool {
        match self {
            Cell::Private { index, .. } => is_rosette(index as i8),
            Cell::Shared(k) => is_rosette(k as i8 + SHARED_START),
        }
    }

    /// Every square of the board: twenty cells.
    pub fn all() -> impl Iterator<Item = Cell> {
        let shared = (0..8).map(Cell::Shared);
        let private = Side::all().flat_map(|side| {
            [0u8, 1, 2, 3, 12, 13]
                .into_iter()
                .map(move |index| Cell::Private { side, index })
        });
        private.chain(shared)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Private { side, index } => write!(f, "{} square {}", side, index),
            Cell::Shared(k) => write!(f, "shared square {}", k),
        }
    }
}

/// Map a side's path index to its board cell.
///
/// Returns `None` for indices past the end of the path (13).
#[must_use]
pub fn location(side: Side, path_index: u8) -> Option<Cell> {
    if path_index >= FINISH_INDEX as u8 {
        None
    } else if (SHARED_START..=SHARED_END).contains(&(path_index as i8)) {
        Some(Cell::Shared(path_index - SHARED_START as u8))
    } else {
        Some(Cell::Private { side, index: path_index })
    }
}

/// Check if a path index is a rosette.
#[must_use]
pub fn is_rosette(path_index: i8) -> bool {
    ROSETTES.contains(&path_index)
}

// =============================================================================
// Move generation
// =============================================================================

/// Where a legal move takes a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MovePlan {
    to: Position,
    captured: Option<PieceId>,
}

/// Work out a piece's move for `roll`, or `None` if it has none.
fn plan_move(state: &MatchState, piece: &Piece, roll: u8) -> Option<MovePlan> {
    if roll == 0 || piece.is_finished() {
        return None;
    }

    let target = piece.position.index() + i8::try_from(roll).ok()?;
    if target == FINISH_INDEX {
        return Some(MovePlan { to: Position::Finished, captured: None });
    }

    // Overshooting the exit is not clamped.
    let to = Position::from_index(target)?;
    let cell = location(piece.owner, to.path_index()?)?;

    match state.occupant(cell) {
        None => Some(MovePlan { to, captured: None }),
        Some(other) => {
            let occupant = state.piece(other)?;
            if occupant.owner == piece.owner || target == SAFE_ROSETTE {
                None
            } else {
                Some(MovePlan { to, captured: Some(other) })
            }
        }
    }
}

/// Pieces of the current side that can move `roll` squares.
#[must_use]
pub fn legal_moves(state: &MatchState, roll: u8) -> MovableSet {
    state
        .pieces_of(state.current_player())
        .filter(|p| plan_move(state, p, roll).is_some())
        .map(|p| p.id)
        .collect()
}

// =============================================================================
// State transitions
// =============================================================================

/// Why an operation was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the match is over")]
    GameOver,
    #[error("dice already rolled this turn")]
    AlreadyRolled,
    #[error("dice not rolled yet")]
    NotRolled,
    #[error("{0} does not exist")]
    UnknownPiece(PieceId),
    #[error("{0} belongs to the other side")]
    NotYourPiece(PieceId),
    #[error("{0} has no legal move with this roll")]
    IllegalMove(PieceId),
}

/// What an accepted move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The piece moved.
    pub piece: PieceId,
    /// Where it started.
    pub from: Position,
    /// Where it ended.
    pub to: Position,
    /// Opponent piece sent back to reserve.
    pub captured: Option<PieceId>,
    /// The mover rolls again.
    pub extra_turn: bool,
    /// Set when this move won the match.
    pub winner: Option<Side>,
}

/// Apply a throw of the dice.
///
/// Returns the sum. A zero roll, or a roll no piece can use, leaves the
/// side with an empty move set; the turn does not pass by itself.
pub fn apply_roll(state: &mut MatchState, dice: Dice) -> Result<u8, MoveError> {
    match state.phase() {
        TurnPhase::AwaitingRoll => {}
        TurnPhase::AwaitingMove { .. } => return Err(MoveError::AlreadyRolled),
        TurnPhase::GameOver { .. } => return Err(MoveError::GameOver),
    }

    let roll = dice.sum();
    state.set_dice(dice);
    state.record(Action::Roll { dice });
    state.set_phase(TurnPhase::AwaitingMove {
        movable: legal_moves(state, roll),
    });
    Ok(roll)
}

/// Move a piece by the last roll.
pub fn apply_move(state: &mut MatchState, id: PieceId) -> Result<MoveOutcome, MoveError> {
    let listed = match state.phase() {
        TurnPhase::AwaitingRoll => return Err(MoveError::NotRolled),
        TurnPhase::GameOver { .. } => return Err(MoveError::GameOver),
        TurnPhase::AwaitingMove { movable } => movable.contains(&id),
    };

    let piece = *state.piece(id).ok_or(MoveError::UnknownPiece(id))?;
    if piece.owner != state.current_player() {
        return Err(MoveError::NotYourPiece(id));
    }
    if !listed {
        return Err(MoveError::IllegalMove(id));
    }
    let plan = plan_move(state, &piece, state.last_roll()).ok_or(MoveError::IllegalMove(id))?;

    state.record(Action::Move { piece: id });
    if let Some(captured) = plan.captured {
        state.set_position(captured, Position::Reserve);
    }
    state.set_position(id, plan.to);

    let mut outcome = MoveOutcome {
        piece: id,
        from: piece.position,
        to: plan.to,
        captured: plan.captured,
        extra_turn: false,
        winner: None,
    };

    if plan.to == Position::Finished {
        // Bearing off never grants a bonus roll.
        if state.finished_count(piece.owner) == PIECES_PER_SIDE {
            state.set_phase(TurnPhase::GameOver { winner: piece.owner });
            outcome.winner = Some(piece.owner);
        } else {
            state.pass_turn();
        }
    } else if is_rosette(plan.to.index()) {
        state.set_phase(TurnPhase::AwaitingRoll);
        outcome.extra_turn = true;
    } else {
        state.pass_turn();
    }

    Ok(outcome)
}

/// Pass the turn to the other side without moving.
pub fn apply_switch(state: &mut MatchState) -> Result<(), MoveError> {
    if state.is_over() {
        return Err(MoveError::GameOver);
    }
    state.record(Action::SwitchTurn);
    state.pass_turn();
    Ok(())
}

// =============================================================================
// Engine
// =============================================================================

/// Owns one match, its dice and the persisted win tally.
///
/// ## Example
///
/// ```
/// use royal_ur::core::MatchConfig;
/// use royal_ur::rules::MatchEngine;
///
/// let mut engine = MatchEngine::new(MatchConfig::default().with_seed(42));
/// let roll = engine.roll_dice();
///
/// if engine.state().must_pass() {
///     engine.switch_turn();
/// } else {
///     let piece = engine.state().possible_moves()[0];
///     engine.move_piece(piece);
/// }
/// # let _ = roll;
/// ```
#[derive(Debug)]
pub struct MatchEngine<S = MemoryStore> {
    config: MatchConfig,
    state: MatchState,
    rng: GameRng,
    tally: WinTally,
    store: S,
}

impl MatchEngine<MemoryStore> {
    /// Create an engine with an in-memory tally store.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self::with_store(config, MemoryStore::new())
    }
}

impl<S: KeyValueStore> MatchEngine<S> {
    /// Create an engine, loading the win tally from `store`.
    pub fn with_store(config: MatchConfig, store: S) -> Self {
        let tally = WinTally::load(&store, &config.tally_key);
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!("Match engine created, dice seed {}", rng.seed());

        Self {
            state: MatchState::new(config.starting_side),
            config,
            rng,
            tally,
            store,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The current match.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        self.state.snapshot()
    }

    /// Wins so far.
    #[must_use]
    pub fn tally(&self) -> WinTally {
        self.tally
    }

    /// The tally store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dice RNG checkpoint.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume the dice from a checkpoint taken with `rng_state`.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
        debug!("Dice restored, seed {}", state.seed);
    }

    // === Operations ===

    /// Throw the dice and return the sum.
    ///
    /// Outside `AwaitingRoll` nothing changes and the previous sum is
    /// returned.
    pub fn roll_dice(&mut self) -> u8 {
        self.try_roll_dice().unwrap_or_else(|_| self.state.last_roll())
    }

    /// Throw the dice, reporting why a roll is refused.
    pub fn try_roll_dice(&mut self) -> Result<u8, MoveError> {
        if !self.state.waiting_for_roll() {
            return self.rejected(self.roll_refusal());
        }
        let dice = self.rng.roll_dice();
        self.roll_dice_with(dice)
    }

    /// Apply a roll chosen by the caller instead of thrown by the engine.
    pub fn roll_dice_with(&mut self, dice: Dice) -> Result<u8, MoveError> {
        match apply_roll(&mut self.state, dice) {
            Ok(roll) => {
                debug!(
                    "{} rolled {} ({:?}), movable {:?}",
                    self.state.current_player(),
                    roll,
                    dice.values(),
                    self.state.possible_moves()
                );
                Ok(roll)
            }
            Err(e) => self.rejected(e),
        }
    }

    /// Move a piece by the last roll. Illegal requests are ignored.
    pub fn move_piece(&mut self, piece: PieceId) {
        let _ = self.try_move_piece(piece);
    }

    /// Move a piece by the last roll, reporting why a move is refused.
    pub fn try_move_piece(&mut self, piece: PieceId) -> Result<MoveOutcome, MoveError> {
        let side = self.state.current_player();
        let outcome = match apply_move(&mut self.state, piece) {
            Ok(outcome) => outcome,
            Err(e) => return self.rejected(e),
        };

        debug!(
            "{} moved {} from {} to {}",
            side,
            piece,
            outcome.from.index(),
            outcome.to.index()
        );
        if let Some(captured) = outcome.captured {
            debug!("{} captured {}", side, captured);
        }
        if let Some(winner) = outcome.winner {
            self.record_win(winner);
        }

        Ok(outcome)
    }

    /// Pass the turn without a move (after a zero or blocked roll).
    ///
    /// Does nothing once the match is over.
    pub fn switch_turn(&mut self) {
        match apply_switch(&mut self.state) {
            Ok(()) => debug!("Turn passed to {}", self.state.current_player()),
            Err(e) => debug!("Turn switch ignored: {}", e),
        }
    }

    /// Start a new match. The win tally is kept.
    pub fn reset_game(&mut self) {
        self.state = MatchState::new(self.config.starting_side);
        info!("New match, {} to roll", self.state.current_player());
    }

    /// Put a piece at a position (puzzles and test setups).
    pub fn place_piece(&mut self, piece: PieceId, position: Position) -> Result<(), PlacementError> {
        self.state.place_piece(piece, position)
    }

    // === Internals ===

    fn roll_refusal(&self) -> MoveError {
        if self.state.is_over() {
            MoveError::GameOver
        } else {
            MoveError::AlreadyRolled
        }
    }

    fn rejected<T>(&self, error: MoveError) -> Result<T, MoveError> {
        debug!("{} request rejected: {}", self.state.current_player(), error);
        Err(error)
    }

    fn record_win(&mut self, winner: Side) {
        self.tally.record_win(winner);
        info!(
            "{} wins (light {}, dark {})",
            winner, self.tally.light_wins, self.tally.dark_wins
        );
        if let Err(e) = self.tally.save(&mut self.store, &self.config.tally_key) {
            warn!("Could not save win tally: {}", e);
        }
    }
}
