//! Bottom-up convolution over stacked damage.
//!
//! Non-recursive counterpart of the engine's depth-first search. The state
//! after each turn is a vector indexed by total damage so far, where every
//! total at or above the target HP is merged into the last bucket. Each
//! bucket holds the number of roll combinations that reach it.

use crate::damage::{RollWeights, ROLL_COUNT};

/// Number of roll combinations (out of `39^N`) whose total reaches `hp`.
pub(crate) fn count_iterative(outcomes: &[&RollWeights], hp: u32) -> u128 {
    let hp = hp as usize;
    let mut buckets = vec![0u128; hp + 1];
    buckets[0] = 1;

    for outcome in outcomes {
        let mut next = vec![0u128; hp + 1];
        for (stacked, &count) in buckets.iter().enumerate() {
            if count == 0 {
                continue;
            }
            if stacked == hp {
                next[hp] += count * ROLL_COUNT as u128;
                continue;
            }
            for (dmg, weight) in outcome.iter() {
                let total = (stacked + dmg as usize).min(hp);
                next[total] += count * weight as u128;
            }
        }
        buckets = next;
    }

    buckets[hp]
}
