//! Property-based tests for evaluation and role bookkeeping.

use ab_dfa::{Dfa, DfaError, StateId};
use proptest::prelude::*;

const MAX_STATES: usize = 6;

// Strategy for generating complete automata: (state count, transitions, finals)
fn complete_dfa() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<bool>)> {
    (1..=MAX_STATES).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

fn build(n: usize, edges: &[(usize, usize)], finals: &[bool]) -> (Dfa, Vec<StateId>) {
    let mut dfa = Dfa::new();
    let ids: Vec<StateId> = (0..n)
        .map(|i| dfa.add_state(format!("q{i}"), i == 0, finals[i]).unwrap())
        .collect();
    for (i, &(on_a, on_b)) in edges.iter().enumerate() {
        dfa.set_transition_on_a(ids[i], ids[on_a]).unwrap();
        dfa.set_transition_on_b(ids[i], ids[on_b]).unwrap();
    }
    (dfa, ids)
}

// Strategy for generating strings with at least one character outside {a, b}
fn foreign_input() -> impl Strategy<Value = String> {
    ("[ab]{0,8}", "[c-z0-9 AB]", "[a-z]{0,8}")
        .prop_map(|(head, bad, tail)| format!("{head}{bad}{tail}"))
}

proptest! {
    #[test]
    fn foreign_characters_never_yield_a_verdict(
        (n, edges, finals) in complete_dfa(),
        input in foreign_input()
    ) {
        let (dfa, _) = build(n, &edges, &finals);
        let is_invalid_symbol = matches!(dfa.evaluate(&input), Err(DfaError::InvalidSymbol { .. }));
        prop_assert!(is_invalid_symbol);
    }

    #[test]
    fn trace_is_one_longer_than_input(
        (n, edges, finals) in complete_dfa(),
        input in "[ab]{0,24}"
    ) {
        let (dfa, ids) = build(n, &edges, &finals);
        let evaluation = dfa.evaluate(&input).unwrap();
        prop_assert_eq!(evaluation.trace().len(), input.len() + 1);
        prop_assert_eq!(evaluation.trace().states()[0], ids[0]);
    }

    #[test]
    fn evaluation_is_deterministic(
        (n, edges, finals) in complete_dfa(),
        input in "[ab]{0,24}"
    ) {
        let (dfa, _) = build(n, &edges, &finals);
        let first = dfa.evaluate(&input).unwrap();
        let second = dfa.evaluate(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn verdict_matches_last_state(
        (n, edges, finals) in complete_dfa(),
        input in "[ab]{0,24}"
    ) {
        let (dfa, _) = build(n, &edges, &finals);
        let evaluation = dfa.evaluate(&input).unwrap();
        let last = evaluation.trace().last().unwrap();
        prop_assert_eq!(evaluation.is_accepted(), dfa.is_final(last));
    }

    #[test]
    fn at_most_one_initial_state(
        n in 1..=MAX_STATES,
        picks in prop::collection::vec(0..MAX_STATES, 0..16)
    ) {
        let mut dfa = Dfa::new();
        let ids: Vec<StateId> = (0..n)
            .map(|i| dfa.add_state(format!("q{i}"), false, false).unwrap())
            .collect();
        for pick in &picks {
            let _ = dfa.set_initial_state(ids[pick % n]).unwrap();
        }

        let initial = dfa.states().filter(|s| s.is_initial()).count();
        prop_assert_eq!(initial, usize::from(!picks.is_empty()));
        if let Some(last) = picks.last() {
            prop_assert_eq!(dfa.initial_state().map(|s| s.id()), Some(ids[last % n]));
        }
    }

    #[test]
    fn final_flags_match_final_set(
        n in 1..=MAX_STATES,
        ops in prop::collection::vec((any::<bool>(), 0..MAX_STATES), 0..24)
    ) {
        let mut dfa = Dfa::new();
        let ids: Vec<StateId> = (0..n)
            .map(|i| dfa.add_state(format!("q{i}"), false, false).unwrap())
            .collect();
        for (remove, pick) in ops {
            let id = ids[pick % n];
            if remove {
                let _ = dfa.remove_state(id);
            } else if dfa.contains(id) {
                let _ = dfa.set_final_state(id).unwrap();
            }
        }

        let finals = dfa.final_state_names();
        for state in dfa.states() {
            prop_assert_eq!(state.is_final(), finals.contains(&state.name()));
        }
        prop_assert!(dfa.final_states().all(|s| dfa.contains(s.id())));
    }
}
