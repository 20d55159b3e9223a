//! # royal-ur
//!
//! Rules engine for the Royal Game of Ur.
//!
//! Two sides race seven pieces each along private tracks that merge into a
//! shared, contested middle row. The engine owns the match state and
//! enforces move legality, captures, the safe rosette, bonus rolls and win
//! detection. Rendering, input and timers belong to the caller.
//!
//! ## Design Principles
//!
//! 1. **Single owner**: one `MatchState`, mutated only by engine operations.
//!
//! 2. **Explicit phases**: `TurnPhase` makes "awaiting roll", "awaiting move"
//!    and "game over" a tagged variant, so the set of movable pieces can
//!    never go stale.
//!
//! 3. **Caller drives time**: a zero or blocked roll is reported, never
//!    auto-passed. The caller calls `switch_turn`.
//!
//! ## Modules
//!
//! - `core`: sides, pieces, dice, RNG, configuration, actions, state
//! - `rules`: board layout, move generation, `MatchEngine`
//! - `tally`: persisted win counts and their key-value store
//!
//! ## Example
//!
//! ```
//! use royal_ur::{MatchConfig, MatchEngine};
//!
//! let mut engine = MatchEngine::new(MatchConfig::default().with_seed(1));
//!
//! while engine.state().winner().is_none() {
//!     engine.roll_dice();
//!     match engine.state().possible_moves().first() {
//!         Some(&piece) => engine.move_piece(piece),
//!         None => engine.switch_turn(),
//!     }
//! }
//!
//! assert_eq!(engine.tally().light_wins + engine.tally().dark_wins, 1);
//! ```

pub mod core;
pub mod rules;
pub mod tally;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    Piece, PieceId, Position,
    Dice, GameRng, GameRngState,
    MatchConfig, ConfigError,
    Action, ActionRecord,
    MatchState, MatchSnapshot, TurnPhase,
};

pub use crate::rules::{location, legal_moves, Cell, MatchEngine, MoveError, MoveOutcome};

pub use crate::tally::{JsonFileStore, KeyValueStore, MemoryStore, StoreError, WinTally};
