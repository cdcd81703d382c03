//! Exact N-turn kill probability.
//!
//! Every turn has 39 equally likely rolls and an independent crit with
//! probability `crit_rate / 256`. The engine enumerates all `2^N` crit
//! assignments, counts the roll combinations under each assignment whose
//! summed damage reaches the target HP, and weights each count by the
//! assignment's crit probability. All arithmetic is integer: the result
//! is the exact fraction `numerator / (39^N * 256^N)`.

use tracing::{debug, trace, warn};

use crate::damage::{RollWeights, ROLL_COUNT};
use crate::error::{CalcError, Result};
use crate::kill::convolution::count_iterative;
use crate::kill::turn::{TurnRecord, CRIT_DENOMINATOR};
use crate::kill::{ConvolutionMethod, KillOptions};

/// Longest sequence the general path accepts; `(39 * 256)^9` still fits in a u128
pub const MAX_TURNS: usize = 9;

/// `39^n` for `n` in `0..=MAX_TURNS`
const POW_ROLLS: [u128; MAX_TURNS + 1] = {
    let mut table = [1u128; MAX_TURNS + 1];
    let mut i = 1;
    while i <= MAX_TURNS {
        table[i] = table[i - 1] * ROLL_COUNT as u128;
        i += 1;
    }
    table
};

/// Exact probability as a fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillChance {
    pub numerator: u128,
    pub denominator: u128,
}

impl KillChance {
    pub const fn certain() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    pub const fn impossible() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    pub fn is_certain(&self) -> bool {
        self.numerator == self.denominator
    }

    pub fn is_impossible(&self) -> bool {
        self.numerator == 0
    }

    /// Probability as a percentage in `[0, 100]`
    pub fn percent(&self) -> f64 {
        if self.is_certain() {
            return 100.0;
        }
        100.0 * self.numerator as f64 / self.denominator as f64
    }
}

/// Kill chance of `records` against `hp`.
pub fn kill_chance(records: &[TurnRecord], hp: u32, options: KillOptions) -> Result<KillChance> {
    let min_total: u32 = records.iter().map(TurnRecord::guaranteed_min).sum();
    let max_total: u32 = records.iter().map(TurnRecord::best_max).sum();

    if min_total >= hp {
        debug!(hp, min_total, "guaranteed kill");
        return Ok(KillChance::certain());
    }
    if max_total < hp {
        debug!(hp, max_total, "kill out of reach");
        return Ok(KillChance::impossible());
    }

    let turns = records.len();
    if turns > MAX_TURNS {
        return Err(CalcError::TooManyTurns {
            turns,
            max: MAX_TURNS,
        });
    }

    let repeat = options.repeat && turns_identical(records);
    if options.repeat && !repeat {
        warn!(turns, "repeat requested for differing turns, enumerating every crit assignment");
    }

    // Shortcut results indexed by crit count
    let mut by_crits: [Option<u128>; MAX_TURNS + 1] = [None; MAX_TURNS + 1];
    let mut numerator: u128 = 0;

    for mask in 0u32..(1 << turns) {
        let crits = mask.count_ones() as usize;
        if repeat {
            if let Some(contribution) = by_crits[crits] {
                numerator += contribution;
                continue;
            }
        }

        let crit_weight: u128 = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.crit_weight(is_crit(mask, i)) as u128)
            .product();

        let contribution = if crit_weight == 0 {
            0
        } else {
            let outcomes: Vec<&RollWeights> = records
                .iter()
                .enumerate()
                .map(|(i, r)| r.outcome(is_crit(mask, i)))
                .collect();
            let count = match options.method {
                ConvolutionMethod::Recursive => count_recursive(&outcomes, hp),
                ConvolutionMethod::Iterative => count_iterative(&outcomes, hp),
            };
            trace!(mask, crits, count, crit_weight, "crit assignment");
            count * crit_weight
        };

        by_crits[crits] = Some(contribution);
        numerator += contribution;
    }

    let chance = KillChance {
        numerator,
        denominator: POW_ROLLS[turns] * (CRIT_DENOMINATOR as u128).pow(turns as u32),
    };
    debug!(turns, hp, repeat, percent = chance.percent(), "kill chance");
    Ok(chance)
}

/// Whether every record equals the first, so the repeat shortcut applies.
pub fn turns_identical(records: &[TurnRecord]) -> bool {
    records.windows(2).all(|w| w[0] == w[1])
}

#[inline]
fn is_crit(mask: u32, turn: usize) -> bool {
    mask & (1 << turn) != 0
}

/// Number of roll combinations (out of `39^N`) whose total reaches `hp`.
pub(crate) fn count_recursive(outcomes: &[&RollWeights], hp: u32) -> u128 {
    let Some(first) = outcomes.first() else {
        return u128::from(hp == 0);
    };

    // suffix[i] = (min, max) summed over turns i..
    let mut suffix = vec![(0u32, 0u32); outcomes.len() + 1];
    for (i, w) in outcomes.iter().enumerate().rev() {
        suffix[i] = (suffix[i + 1].0 + w.min, suffix[i + 1].1 + w.max);
    }

    let search = Search {
        outcomes,
        suffix: &suffix,
        hp,
    };
    first
        .iter()
        .map(|(dmg, weight)| search.count(0, dmg, weight, 0))
        .sum()
}

struct Search<'a> {
    outcomes: &'a [&'a RollWeights],
    suffix: &'a [(u32, u32)],
    hp: u32,
}

impl Search<'_> {
    /// Combinations in which turn `turn` rolls `rolled` (on `weight` of its
    /// 39 rolls) on top of `stacked`.
    fn count(&self, turn: usize, rolled: u32, weight: u32, stacked: u32) -> u128 {
        let weight = weight as u128;
        let stacked = stacked + rolled;
        let (remaining_min, remaining_max) = self.suffix[turn + 1];
        let remaining_turns = self.outcomes.len() - turn - 1;

        // Every continuation kills
        if stacked + remaining_min >= self.hp {
            return POW_ROLLS[remaining_turns] * weight;
        }

        // No continuation kills
        if remaining_turns == 0 || stacked + remaining_max < self.hp {
            return 0;
        }

        let sum: u128 = self.outcomes[turn + 1]
            .iter()
            .map(|(dmg, w)| self.count(turn + 1, dmg, w, stacked))
            .sum();
        sum * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::roll_frequencies;
    use proptest::prelude::*;

    fn horn_attack_record() -> TurnRecord {
        TurnRecord {
            non_crit: RollWeights {
                min: 9,
                max: 11,
                weights: vec![15, 23, 1],
            },
            crit: RollWeights {
                min: 11,
                max: 14,
                weights: vec![2, 18, 18, 1],
            },
            crit_rate: 25,
        }
    }

    fn percent(records: &[TurnRecord], hp: u32, repeat: bool) -> f64 {
        let options = KillOptions {
            repeat,
            ..KillOptions::default()
        };
        kill_chance(records, hp, options).unwrap().percent()
    }

    #[test]
    fn test_pow_rolls() {
        assert_eq!(POW_ROLLS[0], 1);
        assert_eq!(POW_ROLLS[2], 1521);
        assert_eq!(POW_ROLLS[MAX_TURNS], 39u128.pow(MAX_TURNS as u32));
    }

    #[test]
    fn test_fast_paths() {
        let r = horn_attack_record();
        assert_eq!(percent(&[r.clone(), r.clone()], 18, false), 100.0);
        assert_eq!(percent(&[r.clone(), r.clone()], 29, false), 0.0);
        assert_eq!(percent(&[], 0, false), 100.0);
        assert_eq!(percent(&[], 1, false), 0.0);
    }

    #[test]
    fn test_three_hit_horn_attack() {
        let r = horn_attack_record();
        let p = percent(&[r.clone(), r.clone(), r.clone()], 30, false);
        assert!((p - 46.08966667759565).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn test_repeat_shortcut_matches_full_enumeration() {
        let r = horn_attack_record();
        let records = vec![r; 3];
        let full = kill_chance(&records, 30, KillOptions::default()).unwrap();
        let repeat = kill_chance(
            &records,
            30,
            KillOptions {
                repeat: true,
                ..KillOptions::default()
            },
        )
        .unwrap();
        assert_eq!(full, repeat);
    }

    #[test]
    fn test_exact_fraction() {
        let r = horn_attack_record();
        let chance = kill_chance(&[r], 11, KillOptions::default()).unwrap();
        // Non-crit: 1 roll of 39 at 256-25; crit: all 39 rolls at 25
        assert_eq!(chance.denominator, 39 * 256);
        assert_eq!(chance.numerator, 231 + 39 * 25);
    }

    #[test]
    fn test_recursive_matches_iterative() {
        let r = horn_attack_record();
        let outcomes = [&r.non_crit, &r.crit, &r.non_crit];
        for hp in 25..=40 {
            assert_eq!(count_recursive(&outcomes, hp), count_iterative(&outcomes, hp), "hp {hp}");
        }
    }

    #[test]
    fn test_turns_identical() {
        let r = horn_attack_record();
        assert!(turns_identical(&[]));
        assert!(turns_identical(&[r.clone(), r.clone()]));

        let mut other = r.clone();
        other.crit_rate = 12;
        assert!(!turns_identical(&[r, other]));
    }

    #[test]
    fn test_too_many_turns() {
        let r = horn_attack_record();
        let records = vec![r; MAX_TURNS + 1];
        assert_eq!(
            kill_chance(&records, 100, KillOptions::default()),
            Err(CalcError::TooManyTurns {
                turns: MAX_TURNS + 1,
                max: MAX_TURNS
            })
        );
        // Fast paths still answer
        assert!(kill_chance(&records, 90, KillOptions::default()).unwrap().is_certain());
    }

    /// 39 rolls spread over at most 9 consecutive damage values
    fn roll_weights() -> impl Strategy<Value = RollWeights> {
        (0u32..=40, prop::collection::vec(0u32..=8, ROLL_COUNT as usize)).prop_map(
            |(min, offsets)| {
                RollWeights::from_frequencies(&roll_frequencies(
                    offsets.into_iter().map(|o| min + o),
                    None,
                ))
            },
        )
    }

    fn turn_record() -> impl Strategy<Value = TurnRecord> {
        (roll_weights(), roll_weights(), 0u16..CRIT_DENOMINATOR).prop_map(
            |(non_crit, crit, crit_rate)| TurnRecord {
                non_crit,
                crit,
                crit_rate,
            },
        )
    }

    fn both_counts(outcomes: &[&RollWeights], hp: u32) -> (u128, u128) {
        (count_recursive(outcomes, hp), count_iterative(outcomes, hp))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn counts_agree_at_fast_path_thresholds(records in prop::collection::vec(turn_record(), 1..=4)) {
            let turns = records.len();
            let min_total: u32 = records.iter().map(TurnRecord::guaranteed_min).sum();
            let max_total: u32 = records.iter().map(TurnRecord::best_max).sum();

            for mask in 0u32..(1 << turns) {
                let outcomes: Vec<&RollWeights> = records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| r.outcome(is_crit(mask, i)))
                    .collect();

                let all = POW_ROLLS[turns];
                prop_assert_eq!(both_counts(&outcomes, min_total), (all, all), "mask {}", mask);
                prop_assert_eq!(both_counts(&outcomes, max_total + 1), (0, 0), "mask {}", mask);

                // One step inside this assignment's own range
                let lowest: u32 = outcomes.iter().map(|w| w.min).sum();
                let highest: u32 = outcomes.iter().map(|w| w.max).sum();
                let all_min: u128 = outcomes.iter().map(|w| w.weight_of(w.min) as u128).product();
                let all_max: u128 = outcomes.iter().map(|w| w.weight_of(w.max) as u128).product();
                if highest > lowest {
                    prop_assert_eq!(both_counts(&outcomes, lowest + 1), (all - all_min, all - all_min));
                }
                prop_assert_eq!(both_counts(&outcomes, highest), (all_max, all_max));
            }
        }
    }
}
