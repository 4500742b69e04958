use std::collections::BTreeMap;
use std::collections::VecDeque;

use runa_utilities::VecSet;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::Alphabet;
use crate::AutomatonError;
use crate::Nfa;
use crate::Params;
use crate::State;
use crate::StateSet;
use crate::Symbol;

/// Mapping from sets of input states to the determinized state standing for
/// the set.
pub type SubsetMap = FxHashMap<StateSet, State>;

/// Determinizes the automaton by the subset construction.
pub fn determinize(aut: &Nfa) -> Nfa {
    determinize_full(aut, None).0
}

/// Determinizes the automaton and returns the result together with the
/// highest allocated state index.
///
/// # Details
///
/// The set of initial states becomes state 0; every distinct set of states
/// reached over some symbol is lazily assigned the next free index. A
/// determinized state is final iff its set contains a final state. When a
/// subset map sink is supplied it receives the set-to-state mapping for
/// caller inspection; otherwise an internal map is allocated and discarded.
/// The worklist owns its subset keys, so entries stay stable while the map
/// grows.
pub fn determinize_full(aut: &Nfa, subset_map: Option<&mut SubsetMap>) -> (Nfa, State) {
    let mut owned_map = SubsetMap::default();
    let subset_map = subset_map.unwrap_or(&mut owned_map);

    let mut result = Nfa::new();
    let mut next_state = 0;
    let mut worklist: VecDeque<(StateSet, State)> = VecDeque::new();

    let initial = State::new(next_state);
    next_state += 1;
    subset_map.insert(aut.initial.clone(), initial);
    result.add_initial(initial);
    worklist.push_back((aut.initial.clone(), initial));

    while let Some((subset, new_state)) = worklist.pop_front() {
        if !subset.is_disjoint(&aut.finals) {
            result.add_final(new_state);
        }

        // Merge the posts of all member states, per symbol.
        let mut post_symb: BTreeMap<Symbol, StateSet> = BTreeMap::new();
        for &state in &subset {
            for (&symb, targets) in aut.post_or_empty(state) {
                post_symb.entry(symb).or_default().union_with(targets);
            }
        }

        for (symb, post) in post_symb {
            let post_state = match subset_map.get(&post) {
                Some(&state) => state,
                None => {
                    let state = State::new(next_state);
                    next_state += 1;

                    subset_map.insert(post.clone(), state);
                    worklist.push_back((post, state));
                    state
                }
            };

            result.add_transition(new_state, symb, post_state);
        }
    }

    (result, State::new(next_state - 1))
}

/// Makes the transition relation total with respect to the alphabet: every
/// reachable state is given a transition to the sink state over every symbol
/// it has no outgoing transition for. The automaton is modified in place.
pub fn make_complete(aut: &mut Nfa, alphabet: &Alphabet, sink_state: State) -> Result<(), AutomatonError> {
    let mut worklist: VecDeque<State> = aut.initial.iter().copied().collect();
    let mut processed: FxHashSet<State> = aut.initial.iter().copied().collect();

    // The sink is processed as well, so its own transitions keep the
    // automaton total.
    if processed.insert(sink_state) {
        worklist.push_back(sink_state);
    }

    while let Some(state) = worklist.pop_front() {
        let mut used_symbols: VecSet<Symbol> = VecSet::new();
        let mut discovered: Vec<State> = Vec::new();
        for (&symb, targets) in aut.post_or_empty(state) {
            used_symbols.insert(symb);
            for &tgt in targets {
                if processed.insert(tgt) {
                    discovered.push(tgt);
                }
            }
        }

        worklist.extend(discovered);
        for symb in alphabet.complement(&used_symbols)? {
            aut.add_transition(state, symb, sink_state);
        }
    }

    Ok(())
}

/// Complements the automaton with respect to the alphabet: determinize, make
/// complete with a fresh sink state and swap final and non-final states.
///
/// `params` selects the algorithm; only "classical" is currently available.
pub fn complement(
    aut: &Nfa,
    alphabet: &Alphabet,
    params: &Params,
    subset_map: Option<&mut SubsetMap>,
) -> Result<Nfa, AutomatonError> {
    let algo = params.get("algo").map(String::as_str).unwrap_or("classical");
    if algo != "classical" {
        return Err(AutomatonError::UnknownAlgorithm(algo.to_string()));
    }

    let (mut result, last_state) = determinize_full(aut, subset_map);
    let sink_state = State::new(last_state.value() + 1);
    make_complete(&mut result, alphabet, sink_state)?;

    // The determinized states are numbered densely, the sink one past them.
    result.finals = (0..=sink_state.value())
        .map(State::new)
        .filter(|&state| !result.has_final(state))
        .collect();

    Ok(result)
}
