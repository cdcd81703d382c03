//! Type effectiveness lookup.
//!
//! Gen 1 walks its matchup table in order and scales damage once per
//! matching entry. A dual-typed defender weak (or resistant) on both types
//! therefore compounds to 4x (or 0.25x).
//!
//! Every factor is 0, 0.5 or 2, so the combined multiplier is exact on a
//! quarter scale. Damage leaves this module in quarter points and is only
//! floored once, together with the random roll.

use crate::types::{Type, MATCHUPS};

/// Neutral multiplier on the quarter scale.
pub const NEUTRAL: u32 = 4;

/// Combined multiplier on the quarter scale
/// (0=immune, 1=0.25x, 2=0.5x, 4=1x, 8=2x, 16=4x).
///
/// `defender_types` repeats the primary type for mono-typed defenders;
/// each entry is applied at most once either way.
pub fn multiplier(attack_type: Type, defender_types: [Type; 2]) -> u32 {
    MATCHUPS
        .iter()
        .filter(|m| m.attacker == attack_type && defender_types.contains(&m.defender))
        .fold(NEUTRAL, |mult, m| mult * m.effectiveness.tenths() / 10)
}

/// Scale `damage` by every matching matchup entry, without flooring.
///
/// Returns quarter points: `damage * multiplier`.
#[inline]
pub fn apply_effectiveness(damage: u32, attack_type: Type, defender_types: [Type; 2]) -> u64 {
    damage as u64 * multiplier(attack_type, defender_types) as u64
}

/// Same as [`multiplier`], taking an optional secondary type.
pub fn effectiveness(attack_type: Type, defender1: Type, defender2: Option<Type>) -> u8 {
    multiplier(attack_type, [defender1, defender2.unwrap_or(defender1)]) as u8
}
