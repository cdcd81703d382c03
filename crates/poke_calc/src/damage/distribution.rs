//! Roll frequency tables.
//!
//! Two distinct shapes live here. `RollDistribution` is what a summary
//! prints: damage capped at the defender's HP, keyed by value.
//! `RollWeights` is what the kill engine consumes: uncapped damage,
//! re-keyed by offset from the minimum roll. The kill math must never see
//! capped values, so the types are kept apart.

use std::collections::BTreeMap;

use crate::damage::formula::ROLL_COUNT;

/// Count how many rolls land on each damage value.
///
/// With `cap`, values above it are counted as `cap`.
pub fn roll_frequencies<I>(rolls: I, cap: Option<u32>) -> BTreeMap<u32, u8>
where
    I: IntoIterator<Item = u32>,
{
    let mut freq = BTreeMap::new();
    for dmg in rolls {
        let dmg = cap.map_or(dmg, |cap| dmg.min(cap));
        *freq.entry(dmg).or_insert(0u8) += 1;
    }
    freq
}

/// HP-capped damage histograms for both crit states (display only).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollDistribution {
    pub non_crit: BTreeMap<u32, u8>,
    pub crit: BTreeMap<u32, u8>,
}

impl RollDistribution {
    /// Histogram for one crit state
    pub fn get(&self, crit: bool) -> &BTreeMap<u32, u8> {
        if crit {
            &self.crit
        } else {
            &self.non_crit
        }
    }

    /// Render one histogram as `"9x15, 10x23, 11x1"`
    pub fn format_rolls(&self, crit: bool) -> String {
        self.get(crit)
            .iter()
            .map(|(dmg, count)| format!("{dmg}x{count}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Zero-offset probability weights for one crit state.
///
/// `weights[i]` is how many of the 39 rolls deal exactly `min + i`
/// damage. Offsets inside the range that no roll produces hold 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RollWeights {
    pub min: u32,
    pub max: u32,
    pub weights: Vec<u32>,
}

impl RollWeights {
    /// Re-key a frequency table by offset from its smallest value.
    pub fn from_frequencies(freq: &BTreeMap<u32, u8>) -> Self {
        let (Some((&min, _)), Some((&max, _))) = (freq.first_key_value(), freq.last_key_value())
        else {
            return Self::default();
        };

        let mut weights = vec![0u32; (max - min) as usize + 1];
        for (&dmg, &count) in freq {
            weights[(dmg - min) as usize] = count as u32;
        }

        Self { min, max, weights }
    }

    /// Weights for a move that always deals the same damage
    pub fn constant(damage: u32) -> Self {
        Self {
            min: damage,
            max: damage,
            weights: vec![ROLL_COUNT],
        }
    }

    /// Number of rolls dealing exactly `damage`
    #[inline]
    pub fn weight_of(&self, damage: u32) -> u32 {
        damage
            .checked_sub(self.min)
            .and_then(|offset| self.weights.get(offset as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all weights; 39 for any table built from a full roll sweep
    pub fn total(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// `(damage, weight)` pairs over `min..=max`, zero weights skipped
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0)
            .map(move |(offset, &w)| (self.min + offset as u32, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_frequencies() {
        let rolls = [9, 9, 10, 11, 12, 13];
        let freq = roll_frequencies(rolls, Some(11));
        assert_eq!(freq.get(&9), Some(&2));
        assert_eq!(freq.get(&11), Some(&3));
        assert_eq!(freq.get(&12), None);

        let uncapped = roll_frequencies(rolls, None);
        assert_eq!(uncapped.len(), 5);
    }

    #[test]
    fn test_weights_from_frequencies() {
        let freq = BTreeMap::from([(11, 2), (12, 18), (14, 1)]);
        let w = RollWeights::from_frequencies(&freq);
        assert_eq!(w.min, 11);
        assert_eq!(w.max, 14);
        assert_eq!(w.weights, vec![2, 18, 0, 1]);
        assert_eq!(w.weight_of(13), 0);
        assert_eq!(w.weight_of(14), 1);
        assert_eq!(w.weight_of(10), 0);
        assert_eq!(w.weight_of(99), 0);
        assert_eq!(w.total(), 21);
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![(11, 2), (12, 18), (14, 1)]);
    }

    #[test]
    fn test_constant_weights() {
        let w = RollWeights::constant(12);
        assert_eq!(w.weight_of(12), ROLL_COUNT);
        assert_eq!(w.total(), ROLL_COUNT);
    }

    #[test]
    fn test_format_rolls() {
        let dist = RollDistribution {
            non_crit: BTreeMap::from([(9, 15), (10, 23), (11, 1)]),
            crit: BTreeMap::new(),
        };
        assert_eq!(dist.format_rolls(false), "9x15, 10x23, 11x1");
        assert_eq!(dist.format_rolls(true), "");
    }
}
