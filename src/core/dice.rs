//! The four binary dice.

use serde::{Deserialize, Serialize};

use super::config::DICE_COUNT;

/// Outcome of one throw: four values, each 0 or 1.
///
/// Presentation renders the individual dice, so the raw values are kept
/// alongside the sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dice([u8; DICE_COUNT]);

impl Dice {
    /// All dice showing 0.
    pub const ZERO: Dice = Dice([0; DICE_COUNT]);

    /// Build dice from raw values. Any nonzero value counts as 1.
    #[must_use]
    pub fn from_values(values: [u8; DICE_COUNT]) -> Self {
        Self(values.map(|v| u8::from(v != 0)))
    }

    /// Dice showing the given total, marked dice first.
    ///
    /// Returns `None` if `total` exceeds the number of dice.
    #[must_use]
    pub fn with_total(total: u8) -> Option<Self> {
        if usize::from(total) > DICE_COUNT {
            return None;
        }
        let mut values = [0u8; DICE_COUNT];
        for v in values.iter_mut().take(usize::from(total)) {
            *v = 1;
        }
        Some(Self(values))
    }

    /// The raw die values.
    #[must_use]
    pub const fn values(&self) -> [u8; DICE_COUNT] {
        self.0
    }

    /// Number of marked dice, 0..=4.
    #[must_use]
    pub fn sum(&self) -> u8 {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_normalizes() {
        let dice = Dice::from_values([0, 2, 1, 9]);
        assert_eq!(dice.values(), [0, 1, 1, 1]);
        assert_eq!(dice.sum(), 3);
    }

    #[test]
    fn test_with_total() {
        assert_eq!(Dice::with_total(0), Some(Dice::ZERO));
        assert_eq!(Dice::with_total(2).unwrap().values(), [1, 1, 0, 0]);
        assert_eq!(Dice::with_total(4).unwrap().sum(), 4);
        assert_eq!(Dice::with_total(5), None);
    }

    #[test]
    fn test_dice_serialize_as_array() {
        let dice = Dice::from_values([1, 0, 1, 0]);
        assert_eq!(serde_json::to_string(&dice).unwrap(), "[1,0,1,0]");
    }
}
