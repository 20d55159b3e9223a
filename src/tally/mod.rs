//! Persisted win tally.
//!
//! The only data that survives a match. The engine loads the tally when it
//! is constructed and writes it back right after every win.
//!
//! - `KeyValueStore`: where the tally lives (memory or a JSON file)
//! - `WinTally`: the `{lightWins, darkWins}` record

pub mod record;
pub mod store;

pub use record::WinTally;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
