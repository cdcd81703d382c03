//! Fixture data structures for kill-probability tests.
//!
//! These types are deserialized from `tests/fixtures/kill_cases.json`.

use poke_calc::{ConvolutionMethod, StatModifier, Stats};
use serde::Deserialize;

/// Root structure for the fixture file.
#[derive(Deserialize)]
pub struct KillFixture {
    pub cases: Vec<KillTestCase>,
}

/// A single multi-turn calculation and its expected outcome.
#[derive(Deserialize, Debug, Clone)]
pub struct KillTestCase {
    pub id: String,
    pub description: String,
    pub attacker: CombatantData,
    pub defender: CombatantData,
    pub turns: Vec<TurnData>,
    #[serde(default)]
    pub repeat: bool,
    pub method: Option<ConvolutionMethod>,
    pub expected: ExpectedResult,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CombatantData {
    pub level: u8,
    pub types: Vec<String>,
    pub base_speed: u8,
    pub stats: Stats,
    #[serde(default)]
    pub badges: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TurnData {
    #[serde(rename = "move")]
    pub move_data: MoveData,
    #[serde(default)]
    pub attacker_mod: StatModifier,
    #[serde(default)]
    pub defender_mod: StatModifier,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MoveData {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: u16,
    pub index: u16,
    pub accuracy: u8,
    pub pp: u8,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExpectedResult {
    pub first_turn: DamageRange,
    pub kill_percent: f64,
}

/// Damage bounds of the first turn, both crit states.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
    pub crit_min: u32,
    pub crit_max: u32,
}
