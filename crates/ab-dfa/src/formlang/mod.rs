//! Deterministic finite automata over a two-symbol alphabet.
//!
//! This module provides:
//! - An arena-backed DFA whose states are addressed by automaton-scoped handles
//! - Graph mutation that keeps a single initial state and a consistent final set
//! - Input evaluation with alphabet validation and an auditable trace
//! - Reachability and completeness checks over the transition graph

mod dfa;
mod error;
mod evaluation;
mod state;
mod symbol;

pub use dfa::Dfa;
pub use error::{DfaError, Notice, Outcome};
pub use evaluation::{Evaluation, Trace, Verdict};
pub use state::{StateId, StateRef, StateSet};
pub use symbol::{Alphabet, Symbol};
