//! The four-state automaton that accepts strings ending in `abb`.

use ab_dfa::{Dfa, DfaError, StateId, Symbol, Verdict};

fn ends_in_abb() -> (Dfa, [StateId; 4]) {
    let mut dfa = Dfa::new();
    let q0 = dfa.add_state("q0", true, false).unwrap();
    let q1 = dfa.add_state("q1", false, false).unwrap();
    let q2 = dfa.add_state("q2", false, false).unwrap();
    let q3 = dfa.add_state("q3", false, true).unwrap();

    dfa.set_transition_on_a(q0, q1).unwrap();
    dfa.set_transition_on_b(q0, q0).unwrap();
    dfa.set_transition_on_a(q1, q1).unwrap();
    dfa.set_transition_on_b(q1, q2).unwrap();
    dfa.set_transition_on_a(q2, q1).unwrap();
    dfa.set_transition_on_b(q2, q3).unwrap();
    dfa.set_transition_on_a(q3, q1).unwrap();
    dfa.set_transition_on_b(q3, q1).unwrap();

    (dfa, [q0, q1, q2, q3])
}

#[test]
fn accepts_abb_with_full_trace() {
    let (dfa, [q0, q1, q2, q3]) = ends_in_abb();
    let evaluation = dfa.evaluate("abb").unwrap();

    assert_eq!(evaluation.verdict(), Verdict::Accepted);
    assert_eq!(evaluation.trace().names(), ["q0", "q1", "q2", "q3"]);
    assert_eq!(evaluation.trace().states(), [q0, q1, q2, q3]);
    assert_eq!(
        evaluation.to_string(),
        "q0 --> q1 --> q2 --> q3\nInput accepted."
    );
}

#[test]
fn verdicts_for_sample_inputs() {
    let (dfa, _) = ends_in_abb();
    let cases = [
        ("aaaabb", true),
        ("ababab", false),
        ("baaabbb", false),
        ("abbaabb", true),
    ];
    for (input, expected) in cases {
        assert_eq!(dfa.accepts(input).unwrap(), expected, "input {input:?}");
    }
}

#[test]
fn foreign_character_yields_no_trace() {
    let (dfa, _) = ends_in_abb();
    let err = dfa.evaluate("abc").unwrap_err();
    assert!(matches!(
        err,
        DfaError::InvalidSymbol {
            found: 'c',
            position: 2,
            ..
        }
    ));
    assert!(err.to_string().contains("a and b only"));
}

#[test]
fn queries_report_roles() {
    let (dfa, [q0, _, _, q3]) = ends_in_abb();
    assert_eq!(dfa.initial_state_name(), Some("q0"));
    assert_eq!(dfa.final_state_names(), vec!["q3"]);
    assert!(dfa.state(q0).unwrap().is_initial());
    assert!(dfa.state(q3).unwrap().is_final());
    assert!(dfa.is_complete());
    assert_eq!(dfa.transitions().count(), 8);
    assert_eq!(dfa.reachable_states().len(), 4);
}

#[test]
fn removing_initial_state_blocks_evaluation() {
    let (mut dfa, [q0, q1, _, _]) = ends_in_abb();
    assert!(dfa.remove_state(q0).is_applied());
    assert_eq!(dfa.evaluate("abb"), Err(DfaError::NoInitialState));

    assert!(dfa.set_initial_state(q1).unwrap().is_applied());
    assert!(dfa.accepts("bb").unwrap());
}

#[test]
fn symbol_sequences_match_string_input() {
    let (dfa, [q0, ..]) = ends_in_abb();
    let from_symbols = dfa
        .evaluate_symbols(&[Symbol::A, Symbol::B, Symbol::B])
        .unwrap();
    assert_eq!(from_symbols, dfa.evaluate("abb").unwrap());

    let empty = dfa.evaluate_symbols(&[]).unwrap();
    assert_eq!(empty.verdict(), Verdict::Rejected);
    assert_eq!(empty.trace().states(), [q0]);
}
