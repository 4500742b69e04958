use runa_utilities::IndexedSet;
use rustc_hash::FxHashMap;

use crate::Nfa;
use crate::State;
use crate::StateSet;
use crate::Symbol;

/// Computes the union of two automata with disjoint state sets. The caller
/// guarantees disjointness; states are copied without renaming.
pub fn union_norename(lhs: &Nfa, rhs: &Nfa) -> Nfa {
    let mut result = Nfa::new();
    for aut in [lhs, rhs] {
        result.add_initial_all(aut.initial.iter().copied());
        result.add_final_all(aut.finals.iter().copied());
        for trans in aut.iter() {
            result.add_trans(trans);
        }
    }

    result
}

/// Copies `src` into `result` while renaming every state through `rename`.
fn copy_renamed<F: FnMut(State) -> State>(result: &mut Nfa, src: &Nfa, mut rename: F) {
    for &state in &src.initial {
        result.add_initial(rename(state));
    }
    for &state in &src.finals {
        result.add_final(rename(state));
    }

    for trans in src.iter() {
        let src_state = rename(trans.src);
        let tgt_state = rename(trans.tgt);
        result.add_transition(src_state, trans.symb, tgt_state);
    }
}

/// Computes the union of two automata whose state sets may overlap. Both
/// inputs are renamed to fresh states; the renaming dictionary is reset
/// between the inputs, so they always end up in disjoint ranges.
pub fn union_rename(lhs: &Nfa, rhs: &Nfa) -> Nfa {
    let mut result = Nfa::new();

    let mut renamed: IndexedSet<State> = IndexedSet::new();
    copy_renamed(&mut result, lhs, |state| State::new(renamed.insert(state).0));

    let offset = renamed.len();
    let mut renamed: IndexedSet<State> = IndexedSet::new();
    copy_renamed(&mut result, rhs, |state| {
        State::new(offset + renamed.insert(state).0)
    });

    result
}

/// Reverses the automaton: initial and final states swap and every transition
/// flips its direction. State indices are preserved.
pub fn revert(aut: &Nfa) -> Nfa {
    let mut result = Nfa::new();
    result.initial = aut.finals.clone();
    result.finals = aut.initial.clone();

    for trans in aut.iter() {
        result.add_transition(trans.tgt, trans.symb, trans.src);
    }

    result
}

/// Removes all transitions over the given epsilon symbol while preserving the
/// language, reading epsilon as the empty word.
///
/// # Details
///
/// First the epsilon closure of every state with outgoing transitions is
/// computed by iterating the extension of source closures with target
/// closures until a fixed point. Then every state inherits the final flag and
/// the non-epsilon transitions of the members of its closure.
pub fn remove_epsilon(aut: &Nfa, epsilon: Symbol) -> Nfa {
    // Every source state starts with itself in its closure.
    let mut closures: FxHashMap<State, StateSet> = FxHashMap::default();
    for trans in aut.iter() {
        let closure = closures
            .entry(trans.src)
            .or_insert_with(|| StateSet::singleton(trans.src));
        if trans.symb == epsilon {
            closure.insert(trans.tgt);
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for trans in aut.iter() {
            if trans.symb != epsilon {
                continue;
            }

            let tgt_closure = closures.get(&trans.tgt).cloned().unwrap_or_default();
            let src_closure = closures
                .get_mut(&trans.src)
                .expect("Source states have a closure");
            for state in tgt_closure {
                if src_closure.insert(state) {
                    changed = true;
                }
            }
        }
    }

    let mut result = Nfa::new();
    result.initial = aut.initial.clone();
    result.finals = aut.finals.clone();

    for (&src, closure) in &closures {
        for &member in closure {
            if aut.has_final(member) {
                result.add_final(src);
            }

            for (&symb, targets) in aut.post_or_empty(member) {
                if symb == epsilon {
                    continue;
                }

                for &tgt in targets {
                    result.add_transition(src, symb, tgt);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Word;
    use crate::are_state_disjoint;
    use crate::is_in_lang;
    use crate::random_nfa;
    use crate::random_words;

    use runa_utilities::random_test;

    fn letter(symb: usize) -> Nfa {
        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(1));
        aut.add_transition(State::new(0), Symbol::new(symb), State::new(1));
        aut
    }

    #[test]
    fn test_union_norename() {
        let lhs = letter(0);

        let mut rhs = Nfa::new();
        rhs.add_initial(State::new(2));
        rhs.add_final(State::new(3));
        rhs.add_transition(State::new(2), Symbol::new(1), State::new(3));
        assert!(are_state_disjoint(&lhs, &rhs));

        let union = union_norename(&lhs, &rhs);
        assert!(is_in_lang(&union, &vec![Symbol::new(0)]));
        assert!(is_in_lang(&union, &vec![Symbol::new(1)]));
        assert!(!is_in_lang(&union, &Word::new()));
        assert_eq!(union.trans_size(), 2);
    }

    #[test]
    fn test_union_rename_separates_overlapping_states() {
        // Both automata use states 0 and 1.
        let lhs = letter(0);
        let rhs = letter(1);

        let union = union_rename(&lhs, &rhs);
        assert_eq!(union.states().len(), 4);
        assert!(is_in_lang(&union, &vec![Symbol::new(0)]));
        assert!(is_in_lang(&union, &vec![Symbol::new(1)]));
        assert!(!is_in_lang(&union, &vec![Symbol::new(0), Symbol::new(1)]));
    }

    #[test]
    fn test_random_union_soundness() {
        random_test(100, |rng| {
            let lhs = random_nfa(rng, 6, 3, 3);
            let rhs = random_nfa(rng, 6, 3, 3);

            let union = union_rename(&lhs, &rhs);
            for word in random_words(rng, 3, 5, 10) {
                assert_eq!(
                    is_in_lang(&union, &word),
                    is_in_lang(&lhs, &word) || is_in_lang(&rhs, &word)
                );
            }
        });
    }

    #[test]
    fn test_double_reversal_restores_the_automaton() {
        random_test(100, |rng| {
            let aut = random_nfa(rng, 8, 3, 3);
            assert_eq!(revert(&revert(&aut)), aut);
        });
    }

    #[test]
    fn test_revert_swaps_word_direction() {
        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(2));
        aut.add_transition(State::new(0), Symbol::new(0), State::new(1));
        aut.add_transition(State::new(1), Symbol::new(1), State::new(2));

        let reverted = revert(&aut);
        assert!(is_in_lang(&reverted, &vec![Symbol::new(1), Symbol::new(0)]));
        assert!(!is_in_lang(&reverted, &vec![Symbol::new(0), Symbol::new(1)]));
    }

    #[test]
    fn test_remove_epsilon_single_transition() {
        let epsilon = Symbol::new(0);

        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(1));
        aut.add_transition(State::new(0), epsilon, State::new(1));

        let result = remove_epsilon(&aut, epsilon);
        assert_eq!(result.initial, StateSet::singleton(State::new(0)));
        assert_eq!(
            result.finals,
            [State::new(0), State::new(1)].into_iter().collect()
        );
        assert!(result.trans_empty());
        assert!(crate::accepts_epsilon(&result));
    }

    #[test]
    fn test_remove_epsilon_closes_over_chains() {
        let epsilon = Symbol::new(9);
        let a = Symbol::new(0);

        // 0 -eps-> 1 -eps-> 2 -a-> 3
        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(3));
        aut.add_transition(State::new(0), epsilon, State::new(1));
        aut.add_transition(State::new(1), epsilon, State::new(2));
        aut.add_transition(State::new(2), a, State::new(3));

        let result = remove_epsilon(&aut, epsilon);
        assert!(result.has_transition(State::new(0), a, State::new(3)));
        assert!(result.has_transition(State::new(1), a, State::new(3)));
        assert!(is_in_lang(&result, &vec![a]));
        assert!(result.iter().all(|trans| trans.symb != epsilon));
    }

    #[test]
    fn test_random_remove_epsilon_has_no_epsilon_left() {
        let epsilon = Symbol::new(0);

        random_test(100, |rng| {
            let aut = random_nfa(rng, 8, 3, 3);
            let result = remove_epsilon(&aut, epsilon);

            assert!(result.iter().all(|trans| trans.symb != epsilon));
            assert_eq!(result.initial, aut.initial);

            // Words without epsilon that the input accepts stay accepted.
            for word in random_words(rng, 3, 5, 10) {
                if word.contains(&epsilon) {
                    continue;
                }

                if is_in_lang(&aut, &word) {
                    assert!(is_in_lang(&result, &word));
                }
            }
        });
    }
}
