//! Core match types: sides, pieces, dice, RNG, configuration, actions, state.
//!
//! This module holds the data the rules operate on. The rules themselves
//! live in `rules`.

pub mod player;
pub mod piece;
pub mod dice;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Side, SideMap};
pub use piece::{Piece, PieceId, Position};
pub use dice::Dice;
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, MatchConfig};
pub use action::{Action, ActionRecord};
pub use state::{MatchSnapshot, MatchState, MovableSet, PieceSnapshot, PlacementError, TurnPhase};
