//! Test helper functions for kill-probability tests.
//!
//! Builders for the recurring early-route matchups, plus conversion of
//! fixture data into library types.

use poke_calc::{BadgeBoosts, Combatant, Move, Stats, Type};

use super::fixtures::{CombatantData, MoveData};

// ============================================================================
// Recurring matchups
// ============================================================================

/// Lv 8 Nidoran (M) with the Boulder Badge
pub fn nidoran() -> Combatant {
    Combatant::new(Type::Poison)
        .level(8)
        .stats(Stats::new(26, 16, 13, 14, 12))
        .badges(BadgeBoosts::ATTACK)
        .base_speed(50)
}

/// Lv 10 Caterpie
pub fn caterpie() -> Combatant {
    Combatant::new(Type::Bug)
        .level(10)
        .stats(Stats::new(30, 12, 13, 14, 10))
        .base_speed(45)
}

/// Lv 12 Geodude
pub fn geodude() -> Combatant {
    Combatant::new(Type::Rock)
        .types(Type::Rock, Some(Type::Ground))
        .level(12)
        .stats(Stats::new(33, 26, 31, 14, 15))
        .base_speed(20)
}

/// Lv 4 Nidoran (M), no badges
pub fn baby_nidoran(hp: u16) -> Combatant {
    Combatant::new(Type::Poison)
        .level(4)
        .stats(Stats::new(hp, 9, 9, 10, 9))
        .base_speed(50)
}

pub fn horn_attack() -> Move {
    Move::new("Horn Attack", 30, Type::Normal, 65, 100, 25)
}

pub fn tackle() -> Move {
    Move::new("Tackle", 33, Type::Normal, 35, 95, 35)
}

/// Compare percentages computed through different float paths
pub fn approx_eq(actual: f64, expected: f64) -> bool {
    if expected == 0.0 {
        return actual == 0.0;
    }
    ((actual - expected) / expected).abs() < 1e-9
}

// ============================================================================
// Fixture conversion
// ============================================================================

fn parse_type(name: &str) -> Result<Type, String> {
    Type::from_str(name).ok_or_else(|| format!("Unknown type: {}", name))
}

fn parse_badges(names: &[String]) -> Result<BadgeBoosts, String> {
    names.iter().try_fold(BadgeBoosts::empty(), |acc, name| {
        let flag = match name.to_lowercase().as_str() {
            "attack" => BadgeBoosts::ATTACK,
            "defense" => BadgeBoosts::DEFENSE,
            "speed" => BadgeBoosts::SPEED,
            "special" => BadgeBoosts::SPECIAL,
            other => return Err(format!("Unknown badge stat: {}", other)),
        };
        Ok(acc | flag)
    })
}

/// Build a combatant from fixture data.
pub fn build_combatant(data: &CombatantData) -> Result<Combatant, String> {
    let primary = data
        .types
        .first()
        .ok_or_else(|| "Combatant needs at least one type".to_string())?;
    let primary = parse_type(primary)?;
    let secondary = data.types.get(1).map(|t| parse_type(t)).transpose()?;

    Ok(Combatant::new(primary)
        .types(primary, secondary)
        .level(data.level)
        .stats(data.stats)
        .base_speed(data.base_speed)
        .badges(parse_badges(&data.badges)?))
}

/// Build a move from fixture data; special-case flags come from the name.
pub fn build_move(data: &MoveData) -> Result<Move, String> {
    Ok(Move::new(
        data.name.clone(),
        data.index,
        parse_type(&data.move_type)?,
        data.power,
        data.accuracy,
        data.pp,
    ))
}
