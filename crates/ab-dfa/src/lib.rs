pub mod formlang;

pub use formlang::{
    Alphabet, Dfa, DfaError, Evaluation, Notice, Outcome, StateId, StateRef, StateSet, Symbol,
    Trace, Verdict,
};
