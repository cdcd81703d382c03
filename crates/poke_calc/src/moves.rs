//! Move definitions.
//!
//! A `Move` is immutable once built. The few Gen 1 moves whose damage
//! does not follow the standard formula are tagged with `MoveFlags` when
//! the move is constructed, so the damage code never matches on names.

use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use phf::phf_map;

use crate::types::Type;

bitflags! {
    /// Behaviour that overrides parts of the damage formula
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        /// Deals damage equal to the attacker's level
        const LEVEL_DAMAGE = 1 << 0;
        /// Halves the target's Defense before the damage formula
        const HALVES_DEFENSE = 1 << 1;
        /// Crit rate uses `min(base_speed * 4, 255) / 256`
        const HIGH_CRIT = 1 << 2;
    }
}

/// Moves with special damage handling, keyed by move id.
static SPECIAL_CASES: phf::Map<&'static str, MoveFlags> = phf_map! {
    "nightshade" => MoveFlags::LEVEL_DAMAGE,
    "selfdestruct" => MoveFlags::HALVES_DEFENSE,
    "explosion" => MoveFlags::HALVES_DEFENSE,
    "crabhammer" => MoveFlags::HIGH_CRIT,
    "karatechop" => MoveFlags::HIGH_CRIT,
    "razorleaf" => MoveFlags::HIGH_CRIT,
    "slash" => MoveFlags::HIGH_CRIT,
};

/// Normalize a display name into a lookup id ("Self-Destruct" -> "selfdestruct").
pub fn move_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Flags for a move name, empty for moves using the standard formula.
pub fn special_case_flags(name: &str) -> MoveFlags {
    SPECIAL_CASES
        .get(move_id(name).as_str())
        .copied()
        .unwrap_or_default()
}

/// Static move data.
///
/// Identity is `(name, index)`: two moves are the same turn key only if
/// both match, whatever their other fields say.
#[derive(Clone, Debug)]
pub struct Move {
    pub name: String,
    /// Game index, used with the name for identity
    pub index: u16,
    pub move_type: Type,
    pub power: u16,
    pub accuracy: u8,
    pub pp: u8,
    pub flags: MoveFlags,
}

impl Move {
    /// Create a move, deriving its special-case flags from the name
    pub fn new(
        name: impl Into<String>,
        index: u16,
        move_type: Type,
        power: u16,
        accuracy: u8,
        pp: u8,
    ) -> Self {
        let name = name.into();
        let flags = special_case_flags(&name);
        Self {
            name,
            index,
            move_type,
            power,
            accuracy,
            pp,
            flags,
        }
    }

    /// Replace the derived flags
    pub fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.move_type.is_special()
    }

    #[inline]
    pub fn has_high_crit(&self) -> bool {
        self.flags.contains(MoveFlags::HIGH_CRIT)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.index == other.index
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.index.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_case_flags() {
        assert_eq!(special_case_flags("Night Shade"), MoveFlags::LEVEL_DAMAGE);
        assert_eq!(special_case_flags("NIGHT SHADE"), MoveFlags::LEVEL_DAMAGE);
        assert_eq!(special_case_flags("Self-Destruct"), MoveFlags::HALVES_DEFENSE);
        assert_eq!(special_case_flags("SelfDestruct"), MoveFlags::HALVES_DEFENSE);
        assert_eq!(special_case_flags("Explosion"), MoveFlags::HALVES_DEFENSE);
        assert_eq!(special_case_flags("Karate Chop"), MoveFlags::HIGH_CRIT);
        assert_eq!(special_case_flags("Slash"), MoveFlags::HIGH_CRIT);
        assert!(special_case_flags("Tackle").is_empty());
    }

    #[test]
    fn test_identity_ignores_stats() {
        let tackle = Move::new("Tackle", 33, Type::Normal, 35, 95, 35);
        let mut buffed = tackle.clone();
        buffed.power = 40;
        assert_eq!(tackle, buffed);

        let renumbered = Move::new("Tackle", 34, Type::Normal, 35, 95, 35);
        assert_ne!(tackle, renumbered);
    }

    #[test]
    fn test_with_flags_overrides() {
        let toss = Move::new("Seismic Toss", 69, Type::Fighting, 0, 100, 20);
        assert!(toss.flags.is_empty());
        let toss = toss.with_flags(MoveFlags::LEVEL_DAMAGE);
        assert!(toss.flags.contains(MoveFlags::LEVEL_DAMAGE));
    }
}
