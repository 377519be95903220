//! Results of running an input string through a DFA.

use crate::formlang::state::StateId;
use std::fmt;

/// Whether the automaton accepted its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("accepted"),
            Verdict::Rejected => f.write_str("rejected"),
        }
    }
}

/// The states visited while consuming an input, starting with the initial
/// state. Always one entry longer than the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trace {
    states: Vec<StateId>,
    names: Vec<String>,
}

impl Trace {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, state: StateId, name: &str) {
        self.states.push(state);
        self.names.push(name.to_owned());
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The state the walk ended in.
    pub fn last(&self) -> Option<StateId> {
        self.states.last().copied()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(" --> ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Verdict plus the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    verdict: Verdict,
    trace: Trace,
}

impl Evaluation {
    pub(crate) fn new(verdict: Verdict, trace: Trace) -> Self {
        Self { verdict, trace }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.verdict {
            Verdict::Accepted => "Input accepted.",
            Verdict::Rejected => "Input rejected.",
        };
        write!(f, "{}\n{verdict}", self.trace)
    }
}
