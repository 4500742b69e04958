use std::collections::VecDeque;

use log::trace;
use rustc_hash::FxHashMap;

use crate::Nfa;
use crate::State;

/// Mapping from pairs of input states to the product state standing for the
/// pair.
pub type ProductMap = FxHashMap<(State, State), State>;

/// Computes the intersection of two automata as the reachable part of their
/// product.
///
/// # Details
///
/// Starting from the pairs of initial states, a worklist discovers the pairs
/// whose components can step over a common symbol; every newly discovered
/// pair is assigned the next free product state. A product state is final iff
/// both components are final. When a product map sink is supplied it receives
/// the pair-to-state mapping for caller inspection; otherwise an internal map
/// is allocated and discarded.
pub fn intersection(lhs: &Nfa, rhs: &Nfa, prod_map: Option<&mut ProductMap>) -> Nfa {
    let mut owned_map = ProductMap::default();
    let prod_map = prod_map.unwrap_or(&mut owned_map);

    let mut result = Nfa::new();
    let mut next_state = 0;
    let mut worklist: VecDeque<(State, State, State)> = VecDeque::new();

    for &lhs_state in &lhs.initial {
        for &rhs_state in &rhs.initial {
            let res_state = State::new(next_state);
            next_state += 1;

            prod_map.insert((lhs_state, rhs_state), res_state);
            result.add_initial(res_state);
            worklist.push_back((lhs_state, rhs_state, res_state));
        }
    }

    while let Some((lhs_state, rhs_state, res_state)) = worklist.pop_front() {
        trace!("Considering ({lhs_state}, {rhs_state})");

        if lhs.has_final(lhs_state) && rhs.has_final(rhs_state) {
            result.add_final(res_state);
        }

        for (&symb, lhs_targets) in lhs.post_or_empty(lhs_state) {
            let Some(rhs_targets) = rhs.post_or_empty(rhs_state).get(&symb) else {
                continue;
            };

            for &lhs_tgt in lhs_targets {
                for &rhs_tgt in rhs_targets {
                    let tgt_state = match prod_map.get(&(lhs_tgt, rhs_tgt)) {
                        Some(&state) => state,
                        None => {
                            let state = State::new(next_state);
                            next_state += 1;

                            prod_map.insert((lhs_tgt, rhs_tgt), state);
                            worklist.push_back((lhs_tgt, rhs_tgt, state));
                            trace!("Adding ({lhs_tgt}, {rhs_tgt})");
                            state
                        }
                    };

                    result.add_transition(res_state, symb, tgt_state);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Symbol;
    use crate::Word;
    use crate::is_in_lang;
    use crate::is_lang_empty;
    use crate::random_nfa;
    use crate::random_words;

    use runa_utilities::random_test;
    use test_log::test;

    /// The automaton accepting words of `a`s whose length is a multiple of
    /// `modulus`, shifted by `remainder`.
    fn modulo_counter(modulus: usize, remainder: usize) -> Nfa {
        let a = Symbol::new(0);

        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(remainder));
        for state in 0..modulus {
            aut.add_transition(State::new(state), a, State::new((state + 1) % modulus));
        }

        aut
    }

    #[test]
    fn test_intersection_of_incompatible_counters_is_empty() {
        // Even length versus odd length.
        let lhs = modulo_counter(2, 0);
        let mut rhs = modulo_counter(2, 1);

        let product = intersection(&lhs, &rhs, None);
        assert!(is_lang_empty(&product, None));

        // Making the right side accept even lengths too yields the even words.
        rhs.add_final(State::new(0));
        let product = intersection(&lhs, &rhs, None);
        let a = Symbol::new(0);
        assert!(is_in_lang(&product, &Word::new()));
        assert!(!is_in_lang(&product, &vec![a]));
        assert!(is_in_lang(&product, &vec![a, a]));
    }

    #[test]
    fn test_product_map_covers_reachable_pairs() {
        let lhs = modulo_counter(2, 0);
        let rhs = modulo_counter(3, 0);

        let mut prod_map = ProductMap::default();
        let product = intersection(&lhs, &rhs, Some(&mut prod_map));

        // The reachable product of the 2-cycle and the 3-cycle is the 6-cycle.
        assert_eq!(prod_map.len(), 6);
        assert_eq!(product.states().len(), 6);
        assert_eq!(prod_map[&(State::new(0), State::new(0))], State::new(0));
    }

    #[test]
    fn test_random_intersection_soundness() {
        random_test(100, |rng| {
            let lhs = random_nfa(rng, 6, 3, 3);
            let rhs = random_nfa(rng, 6, 3, 3);

            let product = intersection(&lhs, &rhs, None);
            for word in random_words(rng, 3, 5, 10) {
                assert_eq!(
                    is_in_lang(&product, &word),
                    is_in_lang(&lhs, &word) && is_in_lang(&rhs, &word)
                );
            }
        });
    }
}
