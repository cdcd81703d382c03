//! Multi-turn kill probability.
//!
//! Turn inputs are compiled into `TurnRecord`s, which the engine combines
//! into an exact `KillChance`. Both convolution methods give identical
//! counts; the recursive one prunes harder, the iterative one has no
//! recursion depth.

pub mod convolution;
pub mod engine;
pub mod turn;

pub use engine::{kill_chance, turns_identical, KillChance, MAX_TURNS};
pub use turn::{compile_turns, crit_rate, TurnInput, TurnRecord, CRIT_DENOMINATOR};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::Combatant;
use crate::error::{CalcError, Result, Sequence};
use crate::moves::Move;
use crate::stat_modifier::StatModifier;

/// How roll combinations are counted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvolutionMethod {
    /// Depth-first search with min/max pruning
    #[default]
    Recursive,
    /// Bottom-up convolution over stacked-damage buckets
    Iterative,
}

impl ConvolutionMethod {
    pub const fn name(self) -> &'static str {
        match self {
            ConvolutionMethod::Recursive => "recursive",
            ConvolutionMethod::Iterative => "iterative",
        }
    }
}

impl fmt::Display for ConvolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConvolutionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" => Ok(ConvolutionMethod::Recursive),
            "iterative" => Ok(ConvolutionMethod::Iterative),
            other => Err(format!("unknown convolution method '{other}'")),
        }
    }
}

/// Per-call knobs for the kill engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillOptions {
    /// Every turn is the same: reuse results across crit assignments with
    /// equal crit counts. Ignored (with a warning) if the turns differ.
    pub repeat: bool,
    pub method: ConvolutionMethod,
}

impl KillOptions {
    pub fn repeating() -> Self {
        Self {
            repeat: true,
            ..Self::default()
        }
    }
}

/// Kill percentage of pre-compiled `records` against `hp`.
pub fn kill_probability(records: &[TurnRecord], hp: u32, repeat: bool) -> Result<f64> {
    let options = KillOptions {
        repeat,
        ..KillOptions::default()
    };
    Ok(kill_chance(records, hp, options)?.percent())
}

/// Kill percentage of the same move and modifiers used `hits` times.
pub fn n_shot(
    attacker: &Combatant,
    defender: &Combatant,
    hits: usize,
    move_data: &Move,
    att_mod: &StatModifier,
    def_mod: &StatModifier,
    options: KillOptions,
) -> Result<f64> {
    n_shot_with_mods(
        attacker,
        defender,
        hits,
        &vec![move_data; hits],
        &vec![*att_mod; hits],
        &vec![*def_mod; hits],
        options,
    )
}

/// Kill percentage of a turn-by-turn sequence of moves and modifiers.
///
/// Every sequence must hold exactly `turns` entries.
pub fn n_shot_with_mods(
    attacker: &Combatant,
    defender: &Combatant,
    turns: usize,
    moves: &[&Move],
    att_mods: &[StatModifier],
    def_mods: &[StatModifier],
    options: KillOptions,
) -> Result<f64> {
    check_len(Sequence::Moves, turns, moves.len())?;
    check_len(Sequence::AttackerModifiers, turns, att_mods.len())?;
    check_len(Sequence::DefenderModifiers, turns, def_mods.len())?;

    let inputs: Vec<TurnInput<'_>> = moves
        .iter()
        .zip(att_mods)
        .zip(def_mods)
        .map(|((&m, a), d)| (m, a, d))
        .collect();

    let records = compile_turns(attacker, defender, &inputs);
    Ok(kill_chance(&records, defender.stats.hp as u32, options)?.percent())
}

fn check_len(sequence: Sequence, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CalcError::InvalidSequenceLength {
            sequence,
            expected,
            actual,
        })
    }
}
