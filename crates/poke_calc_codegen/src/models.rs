//! JSON deserialization structures for the Gen 1 data files.

use serde::Deserialize;

#[derive(Deserialize)]
pub struct TypeChart {
    pub types: Vec<TypeEntry>,
    /// Matchups in cartridge order.
    pub matchups: Vec<MatchupEntry>,
}

#[derive(Deserialize)]
pub struct TypeEntry {
    pub name: String,
    /// Gen 1 splits physical/special by type, not by move.
    pub special: bool,
}

#[derive(Deserialize)]
pub struct MatchupEntry {
    pub attacker: String,
    pub defender: String,
    /// Damage multiplier times ten (0, 5 or 20).
    pub multiplier: u8,
}
