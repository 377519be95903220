//! Errors and non-fatal notices reported by the automaton.

use crate::formlang::state::StateId;
use crate::formlang::symbol::Alphabet;
use std::fmt;
use thiserror::Error;

/// Conditions that stop the operation that hit them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DfaError {
    #[error("the alphabet of this DFA is {alphabet} only (found {found:?} at position {position})")]
    InvalidSymbol {
        found: char,
        position: usize,
        alphabet: Alphabet,
    },
    #[error("alphabet needs two distinct symbols (got {symbol:?} twice)")]
    DegenerateAlphabet { symbol: char },
    #[error("no initial state set")]
    NoInitialState,
    #[error("state {state} has no transition on {symbol:?}")]
    MissingTransition { state: String, symbol: char },
    #[error("state {0} not found in this automaton")]
    StateNotFound(StateId),
    #[error("state name cannot be empty")]
    EmptyStateName,
    #[error("a state named {0} already exists")]
    DuplicateStateName(String),
    #[error("automaton cannot hold more than u32::MAX states")]
    TooManyStates,
}

/// Why a mutation left the automaton unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AlreadyInitial,
    AlreadyFinal,
    StateNotFound,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AlreadyInitial => f.write_str("state is already the initial state"),
            Notice::AlreadyFinal => f.write_str("state is already a final state"),
            Notice::StateNotFound => f.write_str("state not found in the automaton"),
        }
    }
}

/// Result of a mutation whose failure modes are not errors.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged(Notice),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn notice(self) -> Option<Notice> {
        match self {
            Outcome::Applied => None,
            Outcome::Unchanged(notice) => Some(notice),
        }
    }
}
