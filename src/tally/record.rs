//! Cumulative win counts.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::store::{KeyValueStore, StoreError};
use crate::core::Side;

/// Wins per side across matches.
///
/// Stored as `{"lightWins": n, "darkWins": n}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinTally {
    pub light_wins: u32,
    pub dark_wins: u32,
}

impl WinTally {
    /// Wins recorded for a side.
    #[must_use]
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Light => self.light_wins,
            Side::Dark => self.dark_wins,
        }
    }

    /// Add one win for a side.
    pub fn record_win(&mut self, side: Side) {
        match side {
            Side::Light => self.light_wins = self.light_wins.saturating_add(1),
            Side::Dark => self.dark_wins = self.dark_wins.saturating_add(1),
        }
    }

    /// Load the tally stored under `key`.
    ///
    /// Absent, unreadable or malformed data yields a zeroed tally.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Self {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("Could not read win tally {:?}: {}", key, e);
                return Self::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed win tally {:?}: {}", key, e);
            Self::default()
        })
    }

    /// Write the tally under `key`.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S, key: &str) -> Result<(), StoreError> {
        store.set(key, serde_json::to_string(self)?)
    }
}
