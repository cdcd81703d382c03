//! Turn records.
//!
//! A `TurnRecord` is everything the kill engine needs about one turn:
//! uncapped roll weights for both crit states and the crit rate. Records
//! are compiled once per unique (move, attacker mod, defender mod) triple
//! within a single calculation.

use std::collections::HashMap;

use tracing::debug;

use crate::damage::{DamageCalc, RollWeights};
use crate::entities::Combatant;
use crate::moves::Move;
use crate::stat_modifier::StatModifier;

/// Crit rates are numerators over this denominator
pub const CRIT_DENOMINATOR: u16 = 256;

/// Crit rate numerator (out of 256) for `move_data` used by `attacker`.
///
/// High-crit moves: `min(base_speed * 4, 255)`. Everything else:
/// `floor(base_speed / 2)`.
pub fn crit_rate(move_data: &Move, attacker: &Combatant) -> u16 {
    let base_speed = attacker.base_speed as u16;
    if move_data.has_high_crit() {
        (base_speed * 4).min(255)
    } else {
        base_speed / 2
    }
}

/// One turn's damage outcomes and crit rate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TurnRecord {
    pub non_crit: RollWeights,
    pub crit: RollWeights,
    /// Numerator over `CRIT_DENOMINATOR`
    pub crit_rate: u16,
}

impl TurnRecord {
    pub fn new(calc: &DamageCalc<'_>) -> Self {
        Self {
            non_crit: calc.roll_weights(false),
            crit: calc.roll_weights(true),
            crit_rate: crit_rate(calc.move_data, calc.attacker),
        }
    }

    /// Weights for one crit state
    #[inline]
    pub fn outcome(&self, crit: bool) -> &RollWeights {
        if crit {
            &self.crit
        } else {
            &self.non_crit
        }
    }

    /// Probability weight (out of 256) of landing in `crit` state
    #[inline]
    pub fn crit_weight(&self, crit: bool) -> u16 {
        if crit {
            self.crit_rate
        } else {
            CRIT_DENOMINATOR - self.crit_rate
        }
    }

    /// Damage this turn deals at the very least, crit or not
    pub fn guaranteed_min(&self) -> u32 {
        self.non_crit.min.min(self.crit.min)
    }

    /// Damage this turn can deal at the very most, crit or not
    pub fn best_max(&self) -> u32 {
        self.non_crit.max.max(self.crit.max)
    }
}

/// A turn as supplied by the caller
pub type TurnInput<'a> = (&'a Move, &'a StatModifier, &'a StatModifier);

/// Build one record per turn, reusing records for repeated turns.
pub fn compile_turns(
    attacker: &Combatant,
    defender: &Combatant,
    turns: &[TurnInput<'_>],
) -> Vec<TurnRecord> {
    let mut cache: HashMap<TurnInput<'_>, TurnRecord> = HashMap::new();

    let records: Vec<TurnRecord> = turns
        .iter()
        .map(|&(move_data, att_mod, def_mod)| {
            cache
                .entry((move_data, att_mod, def_mod))
                .or_insert_with(|| {
                    let calc = DamageCalc::new(move_data, attacker, defender)
                        .with_mods(att_mod, def_mod);
                    TurnRecord::new(&calc)
                })
                .clone()
        })
        .collect();

    debug!(
        turns = records.len(),
        unique = cache.len(),
        "compiled turn records"
    );
    records
}
