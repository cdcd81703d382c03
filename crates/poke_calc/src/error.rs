//! Error types raised by the calculator.

use std::fmt;

use thiserror::Error;

/// Which per-turn input list had the wrong length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sequence {
    Moves,
    AttackerModifiers,
    DefenderModifiers,
    Stages,
    BadgeBoosts,
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sequence::Moves => "moves",
            Sequence::AttackerModifiers => "attacker modifiers",
            Sequence::DefenderModifiers => "defender modifiers",
            Sequence::Stages => "stat stages",
            Sequence::BadgeBoosts => "badge boosts",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by damage and kill-probability calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("wrong number of {sequence}: expected one per turn ({expected}), got {actual}")]
    InvalidSequenceLength {
        sequence: Sequence,
        expected: usize,
        actual: usize,
    },

    #[error("kill probability supports at most {max} turns, got {turns}")]
    TooManyTurns { turns: usize, max: usize },

    #[error("invalid stat modifier `{input}`: {reason}")]
    InvalidModifier { input: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, CalcError>;
