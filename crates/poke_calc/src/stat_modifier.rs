//! Stat stages and badge boosts.
//!
//! `StatModifier` turns a combatant's raw stat into the value used by the
//! damage formula on a non-critical hit. It is a plain value: equality and
//! hashing cover every field, so it can key the turn record cache.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{Combatant, Stat};
use crate::error::{CalcError, Result, Sequence};

/// Lowest stat stage
pub const MIN_STAGE: i8 = -6;

/// Highest stat stage
pub const MAX_STAGE: i8 = 6;

/// Gen 1 stage multipliers.
///
/// Index 0 = -6, Index 6 = 0, Index 12 = +6
/// Each entry is (numerator, denominator).
const STAGE_TABLE: [(u32, u32); 13] = [
    (25, 100), // -6
    (28, 100), // -5
    (33, 100), // -4
    (40, 100), // -3
    (50, 100), // -2
    (66, 100), // -1
    (1, 1),    //  0
    (15, 10),  // +1
    (2, 1),    // +2
    (25, 10),  // +3
    (3, 1),    // +4
    (35, 10),  // +5
    (4, 1),    // +6
];

/// Apply a stat stage to a raw stat (stage clamped to -6..=6).
pub fn apply_stage(raw: u16, stage: i8) -> u16 {
    let index = (stage.clamp(MIN_STAGE, MAX_STAGE) + 6) as usize;
    let (num, den) = STAGE_TABLE[index];
    (raw as u32 * num / den).min(u16::MAX as u32) as u16
}

/// One 9/8 badge boost.
#[inline]
pub fn badge_boost(value: u16) -> u16 {
    (9 * value as u32 / 8).min(u16::MAX as u32) as u16
}

/// Stat stage changes and badge boost counts for one side of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatModifier {
    pub attack: i8,
    pub defense: i8,
    pub speed: i8,
    pub special: i8,
    pub accuracy: i8,
    pub evasion: i8,
    pub used_x_accuracy: bool,

    /// Extra badge boosts per stat (on top of the one every badge gives)
    pub attack_badge_boosts: u8,
    pub defense_badge_boosts: u8,
    pub speed_badge_boosts: u8,
    pub special_badge_boosts: u8,
}

impl StatModifier {
    /// No stages, no extra badge boosts
    pub const NONE: StatModifier = StatModifier {
        attack: 0,
        defense: 0,
        speed: 0,
        special: 0,
        accuracy: 0,
        evasion: 0,
        used_x_accuracy: false,
        attack_badge_boosts: 0,
        defense_badge_boosts: 0,
        speed_badge_boosts: 0,
        special_badge_boosts: 0,
    };

    /// Stage for a battle stat
    #[inline]
    pub const fn stage(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
            Stat::Special => self.special,
        }
    }

    /// Extra badge boosts for a battle stat
    #[inline]
    pub const fn badge_boosts(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Attack => self.attack_badge_boosts,
            Stat::Defense => self.defense_badge_boosts,
            Stat::Speed => self.speed_badge_boosts,
            Stat::Special => self.special_badge_boosts,
        }
    }

    /// Whether any stage (or X Accuracy) is applied
    pub fn has_stages(&self) -> bool {
        self.attack != 0
            || self.defense != 0
            || self.speed != 0
            || self.special != 0
            || self.accuracy != 0
            || self.evasion != 0
            || self.used_x_accuracy
    }

    /// Whether any extra badge boost is applied
    pub fn has_badge_boosts(&self) -> bool {
        self.attack_badge_boosts != 0
            || self.defense_badge_boosts != 0
            || self.speed_badge_boosts != 0
            || self.special_badge_boosts != 0
    }

    /// Effective value of `stat` for `combatant`, never below 1.
    ///
    /// The stage is applied first; a combatant holding the stat's badge
    /// then gets `badge_boosts + 1` successive 9/8 boosts.
    pub fn modified(&self, stat: Stat, combatant: &Combatant) -> u16 {
        let mut value = apply_stage(combatant.stats.get(stat), self.stage(stat)).max(1);
        if combatant.has_badge(stat) {
            for _ in 0..=self.badge_boosts(stat) {
                value = badge_boost(value);
            }
        }
        value
    }

    pub fn mod_attack(&self, combatant: &Combatant) -> u16 {
        self.modified(Stat::Attack, combatant)
    }

    pub fn mod_defense(&self, combatant: &Combatant) -> u16 {
        self.modified(Stat::Defense, combatant)
    }

    pub fn mod_speed(&self, combatant: &Combatant) -> u16 {
        self.modified(Stat::Speed, combatant)
    }

    pub fn mod_special(&self, combatant: &Combatant) -> u16 {
        self.modified(Stat::Special, combatant)
    }

    /// Modified stats formatted as `hp/att/def/spd/spc`
    pub fn stats_line(&self, combatant: &Combatant) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            combatant.stats.hp,
            self.mod_attack(combatant),
            self.mod_defense(combatant),
            self.mod_speed(combatant),
            self.mod_special(combatant)
        )
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Parse `"att/def/spd/spc"` stages and badge boosts.
    pub fn parse(stages: &str, badge_boosts: &str) -> Result<Self> {
        let [attack, defense, speed, special] = parse_quad::<i8>(stages)?;
        let [att_bb, def_bb, spd_bb, spc_bb] = parse_quad::<u8>(badge_boosts)?;
        Ok(Self {
            attack,
            defense,
            speed,
            special,
            attack_badge_boosts: att_bb,
            defense_badge_boosts: def_bb,
            speed_badge_boosts: spd_bb,
            special_badge_boosts: spc_bb,
            ..Self::NONE
        })
    }

    /// Parse comma-separated per-turn stages and badge boosts.
    ///
    /// A list with a single entry applies to every turn; any other length
    /// must equal `turns`.
    pub fn parse_per_turn(stages: &str, badge_boosts: &str, turns: usize) -> Result<Vec<Self>> {
        let stages = broadcast(stages, turns, Sequence::Stages)?;
        let badge_boosts = broadcast(badge_boosts, turns, Sequence::BadgeBoosts)?;
        stages
            .into_iter()
            .zip(badge_boosts)
            .map(|(s, b)| Self::parse(s, b))
            .collect()
    }
}

impl fmt::Display for StatModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.has_stages() {
            parts.push(format!(
                "+[{}/{}/{}/{}]",
                self.attack, self.defense, self.speed, self.special
            ));
        }
        if self.has_badge_boosts() {
            parts.push(format!(
                "+<{}/{}/{}/{}>",
                self.attack_badge_boosts,
                self.defense_badge_boosts,
                self.speed_badge_boosts,
                self.special_badge_boosts
            ));
        }
        if self.used_x_accuracy {
            parts.push("+X ACC".to_string());
        }

        if parts.is_empty() {
            f.write_str("<No Stat Modifications>")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

fn parse_quad<T: std::str::FromStr>(input: &str) -> Result<[T; 4]> {
    let invalid = |reason| CalcError::InvalidModifier {
        input: input.to_string(),
        reason,
    };

    let values = input
        .split('/')
        .map(|part| part.trim().parse::<T>())
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|_| invalid("expected integers separated by '/'"))?;

    values
        .try_into()
        .map_err(|_| invalid("expected exactly four values"))
}

fn broadcast(input: &str, turns: usize, sequence: Sequence) -> Result<Vec<&str>> {
    let entries: Vec<&str> = input.split(',').map(str::trim).collect();
    match entries.len() {
        n if n == turns => Ok(entries),
        1 => Ok(vec![entries[0]; turns]),
        actual => Err(CalcError::InvalidSequenceLength {
            sequence,
            expected: turns,
            actual,
        }),
    }
}
