//! Board constants and match configuration.
//!
//! The board itself is fixed: two private tracks that merge into one
//! shared track. `MatchConfig` only covers who starts, how dice are
//! seeded, and where the win tally is stored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Side;

/// Pieces owned by each side.
pub const PIECES_PER_SIDE: usize = 7;

/// Pieces in a match.
pub const TOTAL_PIECES: usize = PIECES_PER_SIDE * 2;

/// Number of on-board squares along each side's path (indices 0..=13).
pub const PATH_LENGTH: i8 = 14;

/// Path index of a borne-off piece.
pub const FINISH_INDEX: i8 = PATH_LENGTH;

/// Path index of a piece still in reserve.
pub const RESERVE_INDEX: i8 = -1;

/// First path index of the shared combat zone.
pub const SHARED_START: i8 = 4;

/// Last path index of the shared combat zone.
pub const SHARED_END: i8 = 11;

/// Path indices that grant an extra turn.
pub const ROSETTES: [i8; 3] = [3, 7, 13];

/// The rosette on which pieces cannot be captured.
pub const SAFE_ROSETTE: i8 = 7;

/// Binary dice thrown per roll.
pub const DICE_COUNT: usize = 4;

/// Default store key for the persisted win tally.
pub const DEFAULT_TALLY_KEY: &str = "royal-ur-wins";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse match config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Match configuration.
///
/// ```
/// use royal_ur::core::{MatchConfig, Side};
///
/// let config = MatchConfig::default()
///     .with_starting_side(Side::Dark)
///     .with_seed(7);
///
/// assert_eq!(config.starting_side, Side::Dark);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Side that rolls first in every new match.
    #[serde(default)]
    pub starting_side: Side,

    /// Dice seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Key under which the win tally is stored.
    #[serde(default = "default_tally_key")]
    pub tally_key: String,
}

fn default_tally_key() -> String {
    DEFAULT_TALLY_KEY.to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_side: Side::default(),
            seed: None,
            tally_key: default_tally_key(),
        }
    }
}

impl MatchConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the starting side.
    #[must_use]
    pub fn with_starting_side(mut self, side: Side) -> Self {
        self.starting_side = side;
        self
    }

    /// Seed the dice for a reproducible match.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the win tally store key.
    #[must_use]
    pub fn with_tally_key(mut self, key: impl Into<String>) -> Self {
        self.tally_key = key.into();
        self
    }
}
