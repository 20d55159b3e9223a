//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The two players of a match: `Light` and `Dark`.
//!
//! ## SideMap
//!
//! Fixed per-side storage backed by a two-element array for O(1) access.
//! Supports iteration and indexing by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Light moves first by default.
    #[default]
    Light,
    /// Dark.
    Dark,
}

impl Side {
    /// Both sides, light first.
    pub const ALL: [Side; 2] = [Side::Light, Side::Dark];

    /// Get the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Get the raw side index (light = 0, dark = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Light => 0,
            Side::Dark => 1,
        }
    }

    /// Iterate over both sides.
    ///
    /// ```
    /// use royal_ur::core::Side;
    ///
    /// let sides: Vec<_> = Side::all().collect();
    /// assert_eq!(sides, vec![Side::Light, Side::Dark]);
    /// ```
    pub fn all() -> impl Iterator<Item = Side> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Light => write!(f, "light"),
            Side::Dark => write!(f, "dark"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use royal_ur::core::{Side, SideMap};
///
/// let mut finished: SideMap<u8> = SideMap::with_value(0);
/// finished[Side::Dark] += 1;
///
/// assert_eq!(finished[Side::Light], 0);
/// assert_eq!(finished[Side::Dark], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Light), factory(Side::Dark)],
        }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Light.opponent(), Side::Dark);
        assert_eq!(Side::Dark.opponent(), Side::Light);
        assert_eq!(Side::Light.index(), 0);
        assert_eq!(Side::Dark.index(), 1);
        assert_eq!(Side::default(), Side::Light);
        assert_eq!(format!("{}", Side::Dark), "dark");
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Light).unwrap(), "\"light\"");
        let side: Side = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(side, Side::Dark);
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::Light], 0);
        assert_eq!(map[Side::Dark], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);

        map[Side::Light] = 3;
        *map.get_mut(Side::Dark) += 7;

        assert_eq!(map[Side::Light], 3);
        assert_eq!(map[Side::Dark], 7);
    }

    #[test]
    fn test_side_map_iter() {
        let map: SideMap<i32> = SideMap::new(|s| s.index() as i32 + 1);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Light, &1), (Side::Dark, &2)]);
    }
}
