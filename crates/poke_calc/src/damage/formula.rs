//! Core Gen 1 damage formula.
//!
//! Integer arithmetic throughout; every division truncates and the order
//! of operations matches the cartridge bit for bit.

use crate::damage::effectiveness::{apply_effectiveness, NEUTRAL};
use crate::entities::{Combatant, Stat};
use crate::moves::{Move, MoveFlags};
use crate::stat_modifier::StatModifier;

/// Lowest random roll
pub const MIN_ROLL: u8 = 217;

/// Highest random roll
pub const MAX_ROLL: u8 = 255;

/// Number of equally likely rolls
pub const ROLL_COUNT: u32 = (MAX_ROLL - MIN_ROLL) as u32 + 1;

/// Level term of the damage formula: `floor(2 * level / 5) + 2`.
///
/// A critical hit doubles the level, wrapping at 256.
#[inline]
pub fn level_term(level: u8, crit: bool) -> u32 {
    let level = if crit {
        (level as u32 * 2) % 256
    } else {
        level as u32
    };
    level * 2 / 5 + 2
}

/// Base damage before STAB, effectiveness and the random roll.
///
/// Formula: `floor(floor(level_term * attack * power / 50) / defense) + 2`
pub fn get_base_damage(level_term: u32, power: u32, attack: u32, defense: u32) -> u32 {
    let numerator = level_term as u64 * attack as u64 * power as u64;
    let after_50 = numerator / 50;
    let after_defense = after_50 / defense.max(1) as u64;
    (after_defense + 2).min(u32::MAX as u64) as u32
}

/// Scale quarter-point damage by the random roll:
/// `floor(quarters * roll / (255 * 4))`, at least 1.
#[inline]
pub fn apply_random_roll(quarters: u64, roll: u8) -> u32 {
    let roll = roll.clamp(MIN_ROLL, MAX_ROLL) as u64;
    let scaled = quarters.saturating_mul(roll) / (MAX_ROLL as u64 * NEUTRAL as u64);
    scaled.min(u32::MAX as u64).max(1) as u32
}

/// Attack and defense stats for a hit.
///
/// Crits read the raw stats and bypass every stage and badge boost;
/// non-crits go through the modifiers.
fn select_stats(
    move_data: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    att_mod: &StatModifier,
    def_mod: &StatModifier,
    crit: bool,
) -> (u32, u32) {
    let (atk_stat, def_stat) = if move_data.is_special() {
        (Stat::Special, Stat::Special)
    } else {
        (Stat::Attack, Stat::Defense)
    };

    if crit {
        (
            attacker.stats.get(atk_stat) as u32,
            defender.stats.get(def_stat) as u32,
        )
    } else {
        (
            att_mod.modified(atk_stat, attacker) as u32,
            def_mod.modified(def_stat, defender) as u32,
        )
    }
}

/// Damage of one attack for one random roll.
///
/// `roll` is clamped to `MIN_ROLL..=MAX_ROLL`.
pub fn damage(
    move_data: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    att_mod: &StatModifier,
    def_mod: &StatModifier,
    roll: u8,
    crit: bool,
) -> u32 {
    if move_data.flags.contains(MoveFlags::LEVEL_DAMAGE) {
        return attacker.level as u32;
    }

    if move_data.power == 0 {
        return 0;
    }

    let (attack, mut defense) = select_stats(move_data, attacker, defender, att_mod, def_mod, crit);

    if move_data.flags.contains(MoveFlags::HALVES_DEFENSE) {
        defense = (defense / 2).max(1);
    }

    let mut dmg = get_base_damage(
        level_term(attacker.level, crit),
        move_data.power as u32,
        attack,
        defense,
    );

    // STAB (1.5x)
    if attacker.has_type(move_data.move_type) {
        dmg = dmg.saturating_mul(3) / 2;
    }

    let quarters = apply_effectiveness(dmg, move_data.move_type, defender.types);
    if quarters == 0 {
        return 0;
    }

    apply_random_roll(quarters, roll)
}
