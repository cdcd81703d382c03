use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use poke_calc::kill::TurnInput;
use poke_calc::moves::move_id;
use poke_calc::{BadgeBoosts, Combatant, Move, StatModifier, Stats, Type};
use serde::{Deserialize, Serialize};

// ============================================================================
// Scenario input
// ============================================================================

#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    pub attacker: CombatantEntry,
    pub defender: CombatantEntry,
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub turns: Vec<TurnEntry>,
    #[serde(default)]
    pub repeat: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CombatantEntry {
    pub level: u8,
    pub types: Vec<String>,
    pub base_speed: u8,
    pub stats: Stats,
    #[serde(default)]
    pub badges: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MoveEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: u16,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    #[serde(default)]
    pub pp: u8,
    #[serde(default)]
    pub index: u16,
}

fn default_accuracy() -> u8 {
    100
}

#[derive(Deserialize, Debug, Clone)]
pub struct TurnEntry {
    #[serde(rename = "move")]
    pub move_name: String,
    #[serde(default)]
    pub attacker_mod: ModifierEntry,
    #[serde(default)]
    pub defender_mod: ModifierEntry,
}

/// Stages and badge boosts as `"att/def/spd/spc"` strings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ModifierEntry {
    pub stages: String,
    pub bbs: String,
}

impl Default for ModifierEntry {
    fn default() -> Self {
        Self {
            stages: "0/0/0/0".to_string(),
            bbs: "0/0/0/0".to_string(),
        }
    }
}

impl ModifierEntry {
    pub fn resolve(&self) -> Result<StatModifier> {
        Ok(StatModifier::parse(&self.stages, &self.bbs)?)
    }
}

/// A scenario resolved into library types.
pub struct Fight {
    pub attacker: Combatant,
    pub defender: Combatant,
    pub moves: Vec<Move>,
    pub turns: Vec<Turn>,
    pub repeat: bool,
}

impl Fight {
    /// Engine inputs for each turn, in order
    pub fn inputs(&self) -> Vec<TurnInput<'_>> {
        self.turns
            .iter()
            .map(|t| (&self.moves[t.move_idx], &t.att_mod, &t.def_mod))
            .collect()
    }
}

pub struct Turn {
    /// Index into `Fight::moves`
    pub move_idx: usize,
    pub att_mod: StatModifier,
    pub def_mod: StatModifier,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn resolve(&self) -> Result<Fight> {
        let attacker = self.attacker.build().context("invalid attacker")?;
        let defender = self.defender.build().context("invalid defender")?;
        let moves = self
            .moves
            .iter()
            .map(MoveEntry::build)
            .collect::<Result<Vec<_>>>()?;

        let by_id: HashMap<String, usize> = moves
            .iter()
            .enumerate()
            .map(|(i, m)| (move_id(&m.name), i))
            .collect();

        let turns = self
            .turns
            .iter()
            .enumerate()
            .map(|(n, turn)| {
                let move_idx = *by_id
                    .get(&move_id(&turn.move_name))
                    .ok_or_else(|| anyhow!("turn {}: unknown move '{}'", n + 1, turn.move_name))?;
                Ok(Turn {
                    move_idx,
                    att_mod: turn
                        .attacker_mod
                        .resolve()
                        .with_context(|| format!("turn {}: attacker modifier", n + 1))?,
                    def_mod: turn
                        .defender_mod
                        .resolve()
                        .with_context(|| format!("turn {}: defender modifier", n + 1))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Fight {
            attacker,
            defender,
            moves,
            turns,
            repeat: self.repeat,
        })
    }
}

fn parse_type(name: &str) -> Result<Type> {
    Type::from_str(name).ok_or_else(|| anyhow!("unknown type '{}'", name))
}

impl CombatantEntry {
    pub fn build(&self) -> Result<Combatant> {
        let (primary, secondary) = match self.types.as_slice() {
            [primary] => (parse_type(primary)?, None),
            [primary, secondary] => (parse_type(primary)?, Some(parse_type(secondary)?)),
            other => bail!("expected one or two types, got {}", other.len()),
        };

        let mut badges = BadgeBoosts::empty();
        for badge in &self.badges {
            badges |= match badge.to_lowercase().as_str() {
                "attack" => BadgeBoosts::ATTACK,
                "defense" => BadgeBoosts::DEFENSE,
                "speed" => BadgeBoosts::SPEED,
                "special" => BadgeBoosts::SPECIAL,
                other => bail!("unknown badge stat '{}'", other),
            };
        }

        Ok(Combatant::new(primary)
            .types(primary, secondary)
            .level(self.level)
            .stats(self.stats)
            .base_speed(self.base_speed)
            .badges(badges))
    }
}

impl MoveEntry {
    pub fn build(&self) -> Result<Move> {
        let move_type =
            parse_type(&self.move_type).with_context(|| format!("move '{}'", self.name))?;
        Ok(Move::new(
            self.name.clone(),
            self.index,
            move_type,
            self.power,
            self.accuracy,
            self.pp,
        ))
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Serialize, Deserialize, Default, Clone)]
pub struct KillReport {
    pub timestamp: String,
    pub timestamp_human: String,
    pub scenario: String,
    pub defender_hp: u32,
    pub repeat_requested: bool,
    /// False when the turns differ and every crit assignment was enumerated
    pub repeat_applied: bool,
    pub method: String,
    pub turns: Vec<TurnReport>,
    pub kill_percent: f64,
    /// Exact probability, as decimal strings
    pub numerator: String,
    pub denominator: String,
}

#[derive(Serialize, Deserialize, Default, Clone)]
pub struct TurnReport {
    #[serde(rename = "move")]
    pub move_name: String,
    pub attacker_mod: String,
    pub defender_mod: String,
    pub damage: String,
    pub crit_damage: String,
    /// Crit chance out of 256
    pub crit_rate: u16,
}
