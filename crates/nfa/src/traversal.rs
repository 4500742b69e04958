use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::Nfa;
use crate::Path;
use crate::State;
use crate::Word;

/// Returns the set of states reachable from the initial states.
pub fn reachable_states(aut: &Nfa) -> FxHashSet<State> {
    let mut worklist: VecDeque<State> = aut.initial.iter().copied().collect();
    let mut processed: FxHashSet<State> = aut.initial.iter().copied().collect();

    while let Some(state) = worklist.pop_front() {
        for targets in aut.post_or_empty(state).values() {
            for &tgt in targets {
                if processed.insert(tgt) {
                    worklist.push_back(tgt);
                }
            }
        }
    }

    processed
}

/// Returns a shortest path from an initial state to a final state, or None
/// when no final state is reachable.
///
/// # Details
///
/// A breadth-first search records for every discovered state the state it was
/// first reached from; an initial state is its own predecessor. Ties between
/// equally short paths follow the deterministic transition order of the
/// automaton, so the same automaton always yields the same path.
pub fn shortest_accepting_path(aut: &Nfa) -> Option<Path> {
    let mut worklist: VecDeque<State> = aut.initial.iter().copied().collect();
    let mut predecessors: FxHashMap<State, State> = aut.initial.iter().map(|&state| (state, state)).collect();

    while let Some(state) = worklist.pop_front() {
        if aut.has_final(state) {
            // Unwind the predecessor chain back to an initial state.
            let mut path = vec![state];
            let mut current = state;
            while predecessors[&current] != current {
                current = predecessors[&current];
                path.push(current);
            }

            path.reverse();
            return Some(path);
        }

        for targets in aut.post_or_empty(state).values() {
            for &tgt in targets {
                if !predecessors.contains_key(&tgt) {
                    predecessors.insert(tgt, state);
                    worklist.push_back(tgt);
                }
            }
        }
    }

    None
}

/// Returns a word consistent with the given path of states, or an empty word
/// and false when some consecutive pair of states is not connected by any
/// transition.
///
/// When a pair is connected over more than one symbol the first one in the
/// deterministic transition order is taken.
pub fn word_for_path(aut: &Nfa, path: &Path) -> (Word, bool) {
    if path.is_empty() {
        return (Word::new(), true);
    }

    let mut word = Word::new();
    let mut current = path[0];
    for &next in &path[1..] {
        let connecting = aut
            .post_or_empty(current)
            .iter()
            .find(|(_, targets)| targets.contains(&next))
            .map(|(&symb, _)| symb);

        match connecting {
            Some(symb) => word.push(symb),
            None => return (Word::new(), false),
        }

        current = next;
    }

    (word, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Symbol;

    fn diamond() -> Nfa {
        // Two paths from 0 to 3, the one over 1 with a smaller symbol.
        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(3));
        aut.add_transition(State::new(0), Symbol::new(0), State::new(1));
        aut.add_transition(State::new(0), Symbol::new(1), State::new(2));
        aut.add_transition(State::new(1), Symbol::new(0), State::new(3));
        aut.add_transition(State::new(2), Symbol::new(1), State::new(3));
        aut
    }

    #[test]
    fn test_reachable_states() {
        let mut aut = diamond();
        aut.add_transition(State::new(4), Symbol::new(0), State::new(5));

        let reachable = reachable_states(&aut);
        assert_eq!(reachable.len(), 4);
        assert!(!reachable.contains(&State::new(4)));
        assert!(!reachable.contains(&State::new(5)));
    }

    #[test]
    fn test_shortest_path_is_reproducible() {
        let aut = diamond();

        let path = shortest_accepting_path(&aut).unwrap();
        assert_eq!(path, vec![State::new(0), State::new(1), State::new(3)]);
        assert_eq!(shortest_accepting_path(&aut).unwrap(), path);
    }

    #[test]
    fn test_no_path_without_reachable_final() {
        let mut aut = Nfa::new();
        aut.add_initial(State::new(0));
        aut.add_final(State::new(2));
        aut.add_transition(State::new(0), Symbol::new(0), State::new(1));

        assert!(shortest_accepting_path(&aut).is_none());
    }

    #[test]
    fn test_initial_final_state_yields_singleton_path() {
        let mut aut = Nfa::new();
        aut.add_initial(State::new(1));
        aut.add_final(State::new(1));

        assert_eq!(shortest_accepting_path(&aut).unwrap(), vec![State::new(1)]);
    }

    #[test]
    fn test_word_for_path() {
        let aut = diamond();

        let path = vec![State::new(0), State::new(2), State::new(3)];
        assert_eq!(word_for_path(&aut, &path), (vec![Symbol::new(1), Symbol::new(1)], true));

        let disconnected = vec![State::new(1), State::new(2)];
        assert_eq!(word_for_path(&aut, &disconnected), (Word::new(), false));

        assert_eq!(word_for_path(&aut, &Path::new()), (Word::new(), true));
    }

    #[test]
    fn test_word_for_path_takes_first_symbol() {
        let mut aut = Nfa::new();
        aut.add_transition(State::new(0), Symbol::new(2), State::new(1));
        aut.add_transition(State::new(0), Symbol::new(1), State::new(1));

        let path = vec![State::new(0), State::new(1)];
        assert_eq!(word_for_path(&aut, &path), (vec![Symbol::new(1)], true));
    }
}
