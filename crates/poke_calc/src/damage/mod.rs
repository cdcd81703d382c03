//! Single-attack damage.
//!
//! # Architecture
//!
//! 1. **Formula**: `damage()` evaluates one roll of the Gen 1 formula
//! 2. **Effectiveness**: ordered matchup table, exact on a quarter scale
//! 3. **Distribution**: sweeps all 39 rolls into frequency tables
//!
//! `DamageCalc` bundles the five inputs of a calculation so callers can
//! ask for ranges, tables and kill chances without repeating them.
//!
//! # Usage
//!
//! ```ignore
//! use poke_calc::damage::DamageCalc;
//!
//! let calc = DamageCalc::new(&horn_attack, &nidoran, &caterpie);
//! assert_eq!((calc.min_damage(false), calc.max_damage(false)), (9, 11));
//! ```

pub mod distribution;
pub mod effectiveness;
pub mod formula;

pub use distribution::{roll_frequencies, RollDistribution, RollWeights};
pub use effectiveness::{apply_effectiveness, effectiveness, multiplier};
pub use formula::{damage, MAX_ROLL, MIN_ROLL, ROLL_COUNT};

use crate::entities::Combatant;
use crate::error::Result;
use crate::kill::{n_shot, KillOptions};
use crate::moves::Move;
use crate::stat_modifier::StatModifier;

/// One attack: move, both combatants and both sides' modifiers.
#[derive(Clone, Copy, Debug)]
pub struct DamageCalc<'a> {
    pub move_data: &'a Move,
    pub attacker: &'a Combatant,
    pub defender: &'a Combatant,
    pub att_mod: &'a StatModifier,
    pub def_mod: &'a StatModifier,
}

impl<'a> DamageCalc<'a> {
    /// Calculation with no stat modifications on either side
    pub fn new(move_data: &'a Move, attacker: &'a Combatant, defender: &'a Combatant) -> Self {
        Self {
            move_data,
            attacker,
            defender,
            att_mod: &StatModifier::NONE,
            def_mod: &StatModifier::NONE,
        }
    }

    pub fn with_mods(mut self, att_mod: &'a StatModifier, def_mod: &'a StatModifier) -> Self {
        self.att_mod = att_mod;
        self.def_mod = def_mod;
        self
    }

    /// Damage for one roll
    pub fn damage(&self, roll: u8, crit: bool) -> u32 {
        damage(
            self.move_data,
            self.attacker,
            self.defender,
            self.att_mod,
            self.def_mod,
            roll,
            crit,
        )
    }

    pub fn min_damage(&self, crit: bool) -> u32 {
        self.damage(MIN_ROLL, crit)
    }

    pub fn max_damage(&self, crit: bool) -> u32 {
        self.damage(MAX_ROLL, crit)
    }

    /// Damage for every roll, lowest roll first
    pub fn rolls(&self, crit: bool) -> impl Iterator<Item = u32> + '_ {
        (MIN_ROLL..=MAX_ROLL).map(move |roll| self.damage(roll, crit))
    }

    /// Percentage of rolls that knock out the defender from full HP in one hit.
    ///
    /// 0 when even the highest roll falls short.
    pub fn one_shot_percent(&self, crit: bool) -> f64 {
        let hp = self.defender.stats.hp as u32;
        match (MIN_ROLL..=MAX_ROLL).find(|&roll| self.damage(roll, crit) >= hp) {
            Some(roll) => 100.0 * (MAX_ROLL - roll + 1) as f64 / ROLL_COUNT as f64,
            None => 0.0,
        }
    }

    /// Roll histograms capped at the defender's HP, for display
    pub fn roll_distribution(&self) -> RollDistribution {
        let cap = Some(self.defender.stats.hp as u32);
        RollDistribution {
            non_crit: roll_frequencies(self.rolls(false), cap),
            crit: roll_frequencies(self.rolls(true), cap),
        }
    }

    /// Uncapped zero-offset weights, for probability math
    pub fn roll_weights(&self, crit: bool) -> RollWeights {
        RollWeights::from_frequencies(&roll_frequencies(self.rolls(crit), None))
    }

    /// Kill percentage when this attack is used `hits` times in a row
    pub fn kill_percent(&self, hits: usize, options: KillOptions) -> Result<f64> {
        n_shot(
            self.attacker,
            self.defender,
            hits,
            self.move_data,
            self.att_mod,
            self.def_mod,
            options,
        )
    }

    /// Human-readable report: range line, capped roll tables and every
    /// 1..=8 hit kill chance that is neither negligible nor certain.
    pub fn summary(&self) -> Result<Vec<String>> {
        let (min, max) = (self.min_damage(false), self.max_damage(false));
        let (crit_min, crit_max) = (self.min_damage(true), self.max_damage(true));

        let mut header = self.move_data.name.clone();
        if max == 0 && crit_max == 0 {
            return Ok(vec![header]);
        }
        if max > 0 {
            header.push_str(&format!(" {}-{}", min, max));
        }
        header.push_str(&format!("\t(crit: {}-{})", crit_min, crit_max));

        let dist = self.roll_distribution();
        let mut lines = vec![
            header,
            format!("\tNormal rolls: {}", dist.format_rolls(false)),
            format!("\tCrit rolls: {}", dist.format_rolls(true)),
        ];

        for hits in 1..=SUMMARY_HITS {
            let percent = self.kill_percent(hits, KillOptions::repeating())?;
            if (1.0..=99.999).contains(&percent) {
                lines.push(format!("\t(Overall {}-hit Kill%: {:.4}%)", hits, percent));
            }
        }
        Ok(lines)
    }
}

/// Longest hit count `DamageCalc::summary` reports
pub const SUMMARY_HITS: usize = 8;
