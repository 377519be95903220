//! Deterministic Finite Automaton (DFA) over a two-symbol alphabet.

use crate::formlang::error::{DfaError, Notice, Outcome};
use crate::formlang::evaluation::{Evaluation, Trace, Verdict};
use crate::formlang::state::{AutomatonTag, State, StateId, StateRef, StateSet};
use crate::formlang::symbol::{Alphabet, Symbol};
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, trace, warn};

/// A Deterministic Finite Automaton.
///
/// States live in an arena indexed by [`StateId`]. Removing a state leaves an
/// empty slot behind, so indices are never reused and an edge into a removed
/// state is detected instead of silently pointing somewhere else.
///
/// The automaton is the only record of which state is initial and which are
/// final; [`StateRef::is_initial`] and [`StateRef::is_final`] are answered
/// from that bookkeeping.
///
/// Clones share their tag and their index counter: handles issued before the
/// clone resolve to the same state in both, and states added afterwards never
/// share an index across clones.
#[derive(Debug, Clone)]
pub struct Dfa {
    tag: AutomatonTag,
    /// Next arena index, shared with clones
    next_index: Arc<AtomicU32>,
    alphabet: Alphabet,
    /// State arena, `None` for removed states
    states: Vec<Option<State>>,
    /// Names of live states
    names: IndexMap<String, StateId>,
    /// Start state (None if unset)
    initial_state: Option<StateId>,
    /// Final (accepting) states, in the order they were declared
    final_states: IndexSet<StateId>,
}

impl Dfa {
    /// Create a new empty DFA reading `a` and `b`.
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::default())
    }

    /// Create a new empty DFA reading the characters of `alphabet`.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            tag: AutomatonTag::fresh(),
            next_index: Arc::new(AtomicU32::new(0)),
            alphabet,
            states: Vec::new(),
            names: IndexMap::new(),
            initial_state: None,
            final_states: IndexSet::new(),
        }
    }

    /// Get the alphabet.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    fn get(&self, id: StateId) -> Option<&State> {
        if id.owner() != self.tag {
            return None;
        }
        self.states.get(id.index() as usize)?.as_ref()
    }

    fn get_mut(&mut self, id: StateId) -> Option<&mut State> {
        if id.owner() != self.tag {
            return None;
        }
        self.states.get_mut(id.index() as usize)?.as_mut()
    }

    fn require(&self, id: StateId) -> Result<&State, DfaError> {
        self.get(id).ok_or(DfaError::StateNotFound(id))
    }

    fn allocate_id(&self) -> Result<StateId, DfaError> {
        self.next_index
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                next.checked_add(1)
            })
            .map(|index| StateId::new(self.tag, index))
            .map_err(|_| DfaError::TooManyStates)
    }

    fn name_of(&self, id: StateId) -> &str {
        self.get(id).map_or("", |state| state.name.as_str())
    }

    fn check_name(&self, name: &str, renaming: Option<StateId>) -> Result<(), DfaError> {
        if name.is_empty() {
            return Err(DfaError::EmptyStateName);
        }
        match self.names.get(name) {
            Some(&existing) if Some(existing) != renaming => {
                Err(DfaError::DuplicateStateName(name.to_owned()))
            }
            _ => Ok(()),
        }
    }

    /// Add a new state without transitions and return its handle.
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        is_initial: bool,
        is_final: bool,
    ) -> Result<StateId, DfaError> {
        self.add_state_with_transitions(name, None, None, is_initial, is_final)
    }

    /// Add a new state whose transitions point at existing states.
    pub fn add_state_with_transitions(
        &mut self,
        name: impl Into<String>,
        on_a: Option<StateId>,
        on_b: Option<StateId>,
        is_initial: bool,
        is_final: bool,
    ) -> Result<StateId, DfaError> {
        let name = name.into();
        self.check_name(&name, None)?;
        for target in [on_a, on_b].into_iter().flatten() {
            self.require(target)?;
        }

        let id = self.allocate_id()?;
        debug!(state = %name, %id, "added state");
        self.names.insert(name.clone(), id);
        // Indices taken by clones stay empty here.
        let index = id.index() as usize;
        self.states.resize_with(index, || None);
        self.states.push(Some(State::new(name, on_a, on_b)));

        if is_initial {
            let outcome = self.mark_initial(id);
            debug_assert!(outcome.is_applied());
        }
        if is_final {
            let outcome = self.mark_final(id);
            debug_assert!(outcome.is_applied());
        }
        Ok(id)
    }

    /// Remove a state, dropping its initial and final roles.
    ///
    /// Edges from other states into the removed one are left in place and
    /// surface as [`DfaError::MissingTransition`] when evaluation follows them.
    pub fn remove_state(&mut self, id: StateId) -> Outcome {
        let removed = if id.owner() == self.tag {
            self.states
                .get_mut(id.index() as usize)
                .and_then(Option::take)
        } else {
            None
        };
        let Some(state) = removed else {
            warn!(%id, "{}", Notice::StateNotFound);
            return Outcome::Unchanged(Notice::StateNotFound);
        };

        if self.initial_state == Some(id) {
            self.initial_state = None;
        }
        self.final_states.shift_remove(&id);
        self.names.shift_remove(&state.name);
        debug!(state = %state.name, %id, "removed state");
        Outcome::Applied
    }

    /// Give a state a new name.
    pub fn rename_state(&mut self, id: StateId, name: impl Into<String>) -> Result<(), DfaError> {
        let name = name.into();
        self.require(id)?;
        self.check_name(&name, Some(id))?;

        let state = self.get_mut(id).ok_or(DfaError::StateNotFound(id))?;
        let previous = std::mem::replace(&mut state.name, name.clone());
        self.names.shift_remove(&previous);
        self.names.insert(name, id);
        Ok(())
    }

    /// Point `first`'s transition on `symbol` at `second`, replacing any
    /// previous target.
    pub fn set_transition(
        &mut self,
        first: StateId,
        symbol: Symbol,
        second: StateId,
    ) -> Result<(), DfaError> {
        self.require(second)?;
        let state = self.get_mut(first).ok_or(DfaError::StateNotFound(first))?;
        state.transitions[symbol.slot()] = Some(second);
        trace!(from = %first, to = %second, %symbol, "set transition");
        Ok(())
    }

    /// Set the transition on `A`.
    pub fn set_transition_on_a(&mut self, first: StateId, second: StateId) -> Result<(), DfaError> {
        self.set_transition(first, Symbol::A, second)
    }

    /// Set the transition on `B`.
    pub fn set_transition_on_b(&mut self, first: StateId, second: StateId) -> Result<(), DfaError> {
        self.set_transition(first, Symbol::B, second)
    }

    /// Clear `state`'s transition on `symbol`.
    pub fn remove_transition(&mut self, id: StateId, symbol: Symbol) -> Result<(), DfaError> {
        let state = self.get_mut(id).ok_or(DfaError::StateNotFound(id))?;
        state.transitions[symbol.slot()] = None;
        trace!(state = %id, %symbol, "removed transition");
        Ok(())
    }

    /// Clear the transition on `A`.
    pub fn remove_transition_on_a(&mut self, id: StateId) -> Result<(), DfaError> {
        self.remove_transition(id, Symbol::A)
    }

    /// Clear the transition on `B`.
    pub fn remove_transition_on_b(&mut self, id: StateId) -> Result<(), DfaError> {
        self.remove_transition(id, Symbol::B)
    }

    /// Make `id` the initial state, taking the role from the previous holder.
    pub fn set_initial_state(&mut self, id: StateId) -> Result<Outcome, DfaError> {
        self.require(id)?;
        Ok(self.mark_initial(id))
    }

    fn mark_initial(&mut self, id: StateId) -> Outcome {
        if self.initial_state == Some(id) {
            warn!(state = self.name_of(id), "{}", Notice::AlreadyInitial);
            return Outcome::Unchanged(Notice::AlreadyInitial);
        }
        if let Some(previous) = self.initial_state.replace(id) {
            debug!(state = self.name_of(previous), "cleared initial state");
        }
        debug!(state = self.name_of(id), "set initial state");
        Outcome::Applied
    }

    /// Add `id` to the final states.
    pub fn set_final_state(&mut self, id: StateId) -> Result<Outcome, DfaError> {
        self.require(id)?;
        Ok(self.mark_final(id))
    }

    fn mark_final(&mut self, id: StateId) -> Outcome {
        if !self.final_states.insert(id) {
            warn!(state = self.name_of(id), "{}", Notice::AlreadyFinal);
            return Outcome::Unchanged(Notice::AlreadyFinal);
        }
        debug!(state = self.name_of(id), "added final state");
        Outcome::Applied
    }

    /// Get the number of live states.
    pub fn num_states(&self) -> usize {
        self.names.len()
    }

    /// Check if a handle refers to a live state of this automaton.
    pub fn contains(&self, id: StateId) -> bool {
        self.get(id).is_some()
    }

    /// Check if a state is the initial state.
    pub fn is_initial(&self, id: StateId) -> bool {
        self.initial_state == Some(id)
    }

    /// Check if a state is a final state.
    pub fn is_final(&self, id: StateId) -> bool {
        self.final_states.contains(&id)
    }

    /// Get a view of a live state.
    pub fn state(&self, id: StateId) -> Option<StateRef<'_>> {
        self.get(id)
            .map(|state| StateRef::new(id, state, self.is_initial(id), self.is_final(id)))
    }

    /// Get the handle of the state with the given name.
    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Live states in insertion order.
    pub fn states(&self) -> impl Iterator<Item = StateRef<'_>> + '_ {
        self.states.iter().enumerate().filter_map(move |(index, slot)| {
            let state = slot.as_ref()?;
            let id = StateId::new(self.tag, u32::try_from(index).ok()?);
            Some(StateRef::new(id, state, self.is_initial(id), self.is_final(id)))
        })
    }

    /// Get the initial state.
    pub fn initial_state(&self) -> Option<StateRef<'_>> {
        self.initial_state.and_then(|id| self.state(id))
    }

    /// Get the name of the initial state.
    pub fn initial_state_name(&self) -> Option<&str> {
        self.initial_state().map(|state| state.name())
    }

    /// Get the final states, in the order they were declared.
    pub fn final_states(&self) -> impl Iterator<Item = StateRef<'_>> + '_ {
        self.final_states.iter().filter_map(|&id| self.state(id))
    }

    /// Get the names of the final states, in the order they were declared.
    pub fn final_state_names(&self) -> Vec<&str> {
        self.final_states().map(|state| state.name()).collect()
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, id: StateId, symbol: Symbol) -> Option<StateId> {
        self.get(id)?.on(symbol)
    }

    /// Get all transitions as an iterator of (source, symbol, destination).
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.states().flat_map(|state| {
            Symbol::ALL
                .into_iter()
                .filter_map(move |symbol| state.on(symbol).map(|dst| (state.id(), symbol, dst)))
        })
    }

    /// Run `input` through the automaton.
    ///
    /// The whole string is checked against the alphabet before any state is
    /// visited.
    pub fn evaluate(&self, input: &str) -> Result<Evaluation, DfaError> {
        let symbols = self.alphabet.parse(input)?;
        self.evaluate_symbols(&symbols)
    }

    /// Run an already translated symbol sequence through the automaton.
    pub fn evaluate_symbols(&self, input: &[Symbol]) -> Result<Evaluation, DfaError> {
        let start = self.initial_state.ok_or(DfaError::NoInitialState)?;
        let mut current = start;
        let mut state = self.get(start).ok_or(DfaError::NoInitialState)?;

        let mut trace = Trace::with_capacity(input.len() + 1);
        trace.push(current, &state.name);

        for &symbol in input {
            let next = state
                .on(symbol)
                .and_then(|id| self.get(id).map(|next| (id, next)));
            let Some((next_id, next_state)) = next else {
                return Err(DfaError::MissingTransition {
                    state: state.name.clone(),
                    symbol: self.alphabet.char_of(symbol),
                });
            };
            trace!(
                from = %state.name,
                to = %next_state.name,
                symbol = %self.alphabet.char_of(symbol),
                "step"
            );
            current = next_id;
            state = next_state;
            trace.push(current, &state.name);
        }

        let verdict = Verdict::from(self.is_final(current));
        debug!(symbols = input.len(), last = %state.name, %verdict, "evaluated input");
        Ok(Evaluation::new(verdict, trace))
    }

    /// Whether `input` is accepted, without keeping the trace.
    pub fn accepts(&self, input: &str) -> Result<bool, DfaError> {
        Ok(self.evaluate(input)?.is_accepted())
    }

    /// Find all live states reachable from the initial state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.tag, self.states.len());

        let Some(start) = self.initial_state else {
            return reachable;
        };

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            if reachable.contains(id) {
                continue;
            }
            reachable.insert(id);

            for symbol in Symbol::ALL {
                if let Some(next) = self.transition(id, symbol) {
                    if self.contains(next) && !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        if self.final_states.is_empty() {
            return true;
        }
        let reachable = self.reachable_states();
        !self.final_states.iter().any(|&id| reachable.contains(id))
    }

    /// Live (state, symbol) pairs whose transition is unset or leads to a
    /// removed state.
    pub fn missing_transitions(&self) -> Vec<(StateId, Symbol)> {
        self.states()
            .flat_map(|state| {
                Symbol::ALL.into_iter().filter_map(move |symbol| {
                    match state.on(symbol) {
                        Some(next) if self.contains(next) => None,
                        _ => Some((state.id(), symbol)),
                    }
                })
            })
            .collect()
    }

    /// Whether every live state has a live target on both symbols.
    pub fn is_complete(&self) -> bool {
        self.missing_transitions().is_empty()
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Self::new()
    }
}
