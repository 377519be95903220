//! State types for automata.

use crate::formlang::symbol::Symbol;
use fixedbitset::FixedBitSet;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_TAG: AtomicU32 = AtomicU32::new(0);

/// Identifies the automaton a [`StateId`] was issued by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct AutomatonTag(u32);

impl AutomatonTag {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a state, scoped to the automaton that created it.
///
/// Handles are only issued by the automaton. A handle from another automaton,
/// or one whose state was removed, is reported as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId {
    owner: AutomatonTag,
    index: u32,
}

impl StateId {
    pub(crate) fn new(owner: AutomatonTag, index: u32) -> Self {
        Self { owner, index }
    }

    pub(crate) fn owner(self) -> AutomatonTag {
        self.owner
    }

    /// Position of the state in its automaton's arena (insertion order).
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A named node with one outgoing slot per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct State {
    pub(crate) name: String,
    pub(crate) transitions: [Option<StateId>; 2],
}

impl State {
    pub(crate) fn new(name: String, on_a: Option<StateId>, on_b: Option<StateId>) -> Self {
        Self {
            name,
            transitions: [on_a, on_b],
        }
    }

    pub(crate) fn on(&self, symbol: Symbol) -> Option<StateId> {
        self.transitions[symbol.slot()]
    }
}

/// Read-only view of a state, with its roles resolved against the automaton.
#[derive(Debug, Clone, Copy)]
pub struct StateRef<'a> {
    id: StateId,
    state: &'a State,
    initial: bool,
    accepting: bool,
}

impl<'a> StateRef<'a> {
    pub(crate) fn new(id: StateId, state: &'a State, initial: bool, accepting: bool) -> Self {
        Self {
            id,
            state,
            initial,
            accepting,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.state.name
    }

    /// Target of the transition on `symbol`, if one is set.
    ///
    /// The target may since have been removed from the automaton; evaluation
    /// treats such an edge as missing.
    pub fn on(&self, symbol: Symbol) -> Option<StateId> {
        self.state.on(symbol)
    }

    pub fn on_a(&self) -> Option<StateId> {
        self.on(Symbol::A)
    }

    pub fn on_b(&self) -> Option<StateId> {
        self.on(Symbol::B)
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    pub fn is_final(&self) -> bool {
        self.accepting
    }
}

/// A set of states of one automaton, backed by a fixed-size bit set.
#[derive(Clone, PartialEq, Eq)]
pub struct StateSet {
    owner: AutomatonTag,
    bits: FixedBitSet,
}

impl StateSet {
    pub(crate) fn with_capacity(owner: AutomatonTag, capacity: usize) -> Self {
        Self {
            owner,
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Insert a state into the set.
    pub(crate) fn insert(&mut self, state: StateId) {
        let idx = state.index as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state.index as usize;
        state.owner == self.owner && idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the states in index order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        let owner = self.owner;
        self.bits.ones().map(move |i| StateId::new(owner, i as u32))
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
