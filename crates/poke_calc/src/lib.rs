//! poke_calc - Exact Gen 1 damage and kill-probability calculator
//!
//! Computes the full 39-roll damage distribution of an attack and the exact
//! probability that a sequence of attacks knocks out a target, accounting
//! for every roll and every combination of critical hits. No sampling is
//! involved: results are integer fractions until the final percentage.

/// Type definitions and the ordered matchup table
pub mod types {
    include!(concat!(env!("OUT_DIR"), "/types.rs"));
}

/// Error types
pub mod error;

/// Move data and special-case flags
pub mod moves;

/// Attacker/defender snapshots
pub mod entities;

/// Stat stages and badge boosts
pub mod stat_modifier;

/// Single-attack damage and roll distributions
pub mod damage;

/// Multi-turn kill probability
pub mod kill;

// Re-export commonly used types
pub use damage::{DamageCalc, RollDistribution, RollWeights};
pub use entities::{BadgeBoosts, Combatant, Stat, Stats};
pub use error::{CalcError, Result, Sequence};
pub use kill::{
    kill_chance, kill_probability, n_shot, n_shot_with_mods, ConvolutionMethod, KillChance,
    KillOptions, TurnRecord,
};
pub use moves::{Move, MoveFlags};
pub use stat_modifier::StatModifier;
pub use types::{Type, TypeEffectiveness};
