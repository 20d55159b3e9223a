//! Game rules and the match engine.
//!
//! - Board layout: `Cell`, `location`, `is_rosette`
//! - Move generation: `legal_moves`
//! - State transitions: `apply_roll`, `apply_move`, `apply_switch`
//! - `MatchEngine`: one match plus dice and the persisted win tally
//!
//! The layout, collision and rosette rules live in one module so the
//! presentation layer never has to re-derive them.

pub mod engine;

pub use engine::{
    apply_move, apply_roll, apply_switch, is_rosette, legal_moves, location, Cell, MatchEngine,
    MoveError, MoveOutcome,
};
