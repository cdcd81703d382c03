//! Combatant snapshots.
//!
//! A `Combatant` is the minimal attacker/defender state the damage formula
//! reads: level, raw stats, types, species base Speed and which stats get
//! badge boosts. Callers build one per calculation; nothing here mutates it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::types::Type;

/// Default level
pub const DEFAULT_LEVEL: u8 = 5;

/// A battle stat (HP excluded, it is never modified by stages)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stat {
    Attack,
    Defense,
    Speed,
    Special,
}

impl Stat {
    /// Badge flag that boosts this stat
    pub const fn badge(self) -> BadgeBoosts {
        match self {
            Stat::Attack => BadgeBoosts::ATTACK,
            Stat::Defense => BadgeBoosts::DEFENSE,
            Stat::Speed => BadgeBoosts::SPEED,
            Stat::Special => BadgeBoosts::SPECIAL,
        }
    }
}

bitflags! {
    /// Stats that receive the 9/8 badge boost
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BadgeBoosts: u8 {
        const ATTACK = 1 << 0;
        const DEFENSE = 1 << 1;
        const SPEED = 1 << 2;
        const SPECIAL = 1 << 3;
    }
}

/// Raw (unmodified) stat values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub special: u16,
}

impl Stats {
    pub const fn new(hp: u16, attack: u16, defense: u16, speed: u16, special: u16) -> Self {
        Self {
            hp,
            attack,
            defense,
            speed,
            special,
        }
    }

    /// Raw value of a battle stat
    #[inline]
    pub const fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
            Stat::Special => self.special,
        }
    }
}

/// Attacker/defender snapshot for damage math.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Combatant {
    /// Level (1-100)
    pub level: u8,

    /// Raw stats; crits read these directly
    pub stats: Stats,

    /// Elemental types. Mono-typed species repeat their type.
    pub types: [Type; 2],

    /// Species base Speed (drives the crit rate)
    pub base_speed: u8,

    /// Which stats get badge boosts
    pub badges: BadgeBoosts,
}

impl Combatant {
    /// Create a mono-typed combatant at the default level with zeroed stats
    pub fn new(primary: Type) -> Self {
        Self {
            level: DEFAULT_LEVEL,
            stats: Stats::default(),
            types: [primary, primary],
            base_speed: 0,
            badges: BadgeBoosts::empty(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set level
    pub fn level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 100);
        self
    }

    /// Set both types; pass `None` for a mono-typed species
    pub fn types(mut self, primary: Type, secondary: Option<Type>) -> Self {
        self.types = [primary, secondary.unwrap_or(primary)];
        self
    }

    /// Set all raw stats
    pub fn stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn hp(mut self, hp: u16) -> Self {
        self.stats.hp = hp;
        self
    }

    pub fn attack(mut self, attack: u16) -> Self {
        self.stats.attack = attack;
        self
    }

    pub fn defense(mut self, defense: u16) -> Self {
        self.stats.defense = defense;
        self
    }

    pub fn speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn special(mut self, special: u16) -> Self {
        self.stats.special = special;
        self
    }

    /// Set species base Speed
    pub fn base_speed(mut self, base_speed: u8) -> Self {
        self.base_speed = base_speed;
        self
    }

    /// Set badge-boosted stats
    pub fn badges(mut self, badges: BadgeBoosts) -> Self {
        self.badges = badges;
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether the move type matches either of this combatant's types
    #[inline]
    pub fn has_type(&self, t: Type) -> bool {
        self.types[0] == t || self.types[1] == t
    }

    #[inline]
    pub fn has_badge(&self, stat: Stat) -> bool {
        self.badges.contains(stat.badge())
    }

    /// Secondary type, `None` when mono-typed
    pub fn secondary_type(&self) -> Option<Type> {
        (self.types[1] != self.types[0]).then_some(self.types[1])
    }
}
