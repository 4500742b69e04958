use std::collections::VecDeque;
use std::hash::Hash;

use log::trace;
use rustc_hash::FxHashMap;

use crate::Alphabet;
use crate::AutomatonError;
use crate::Nfa;
use crate::Params;
use crate::State;
use crate::StateSet;
use crate::Word;
use crate::complement;
use crate::intersection;
use crate::is_lang_empty_cex;

const ALGO_ANTICHAINS: &str = "antichains";
const ALGO_CLASSICAL: &str = "classical";

/// An antichain of macrostates per key: for every key only the macrostates
/// that are minimal under set inclusion are kept.
///
/// A macrostate subsumed by a stored one carries no new information, since
/// everything refutable from a macrostate is refutable from any of its
/// subsets.
struct Antichain<K> {
    storage: FxHashMap<K, Vec<StateSet>>,
}

impl<K: Eq + Hash> Antichain<K> {
    fn new() -> Self {
        Self {
            storage: FxHashMap::default(),
        }
    }

    /// Inserts the macrostate for the key unless a subset of it is already
    /// present; stored supersets are evicted. Returns true iff the macrostate
    /// was inserted.
    fn insert(&mut self, key: K, macrostate: &StateSet) -> bool {
        let frontier = self.storage.entry(key).or_default();
        if frontier.iter().any(|existing| existing.is_subset_of(macrostate)) {
            return false;
        }

        frontier.retain(|existing| !macrostate.is_subset_of(existing));
        frontier.push(macrostate.clone());
        true
    }
}

/// Tests whether the automaton accepts every word over the alphabet.
///
/// # Details
///
/// `params` selects the algorithm: "antichains" (the default) explores only
/// macrostates that are minimal under set inclusion, "classical" tests the
/// complement for emptiness. On a negative answer the optional sink receives
/// a word the automaton rejects.
pub fn is_universal(
    aut: &Nfa,
    alphabet: &Alphabet,
    params: &Params,
    cex: Option<&mut Word>,
) -> Result<bool, AutomatonError> {
    match params.get("algo").map(String::as_str).unwrap_or(ALGO_ANTICHAINS) {
        ALGO_ANTICHAINS => is_universal_antichains(aut, alphabet, cex),
        ALGO_CLASSICAL => is_universal_classical(aut, alphabet, cex),
        other => Err(AutomatonError::UnknownAlgorithm(other.to_string())),
    }
}

/// Tests whether the language of `smaller` is included in the language of
/// `bigger`.
///
/// # Details
///
/// `params` selects the algorithm as for [is_universal]. On a negative answer
/// the optional sink receives a word accepted by `smaller` but not by
/// `bigger`.
pub fn is_incl(
    smaller: &Nfa,
    bigger: &Nfa,
    alphabet: &Alphabet,
    params: &Params,
    cex: Option<&mut Word>,
) -> Result<bool, AutomatonError> {
    match params.get("algo").map(String::as_str).unwrap_or(ALGO_ANTICHAINS) {
        ALGO_ANTICHAINS => is_incl_antichains(smaller, bigger, cex),
        ALGO_CLASSICAL => is_incl_classical(smaller, bigger, alphabet, cex),
        other => Err(AutomatonError::UnknownAlgorithm(other.to_string())),
    }
}

fn is_universal_antichains(
    aut: &Nfa,
    alphabet: &Alphabet,
    mut cex: Option<&mut Word>,
) -> Result<bool, AutomatonError> {
    let symbols = alphabet.symbols()?;

    let start = aut.initial.clone();
    if start.is_disjoint(&aut.finals) {
        if let Some(cex) = cex.as_mut() {
            // The empty word is rejected.
            cex.clear();
        }

        return Ok(false);
    }

    let mut antichain: Antichain<()> = Antichain::new();
    antichain.insert((), &start);

    // Worklist entries carry the word over which their macrostate is reached.
    let mut worklist: VecDeque<(StateSet, Word)> = VecDeque::new();
    worklist.push_back((start, Word::new()));

    while let Some((macrostate, word)) = worklist.pop_front() {
        for &symb in &symbols {
            let successor = aut.post_on(&macrostate, symb);

            let mut next_word = word.clone();
            next_word.push(symb);

            if successor.is_disjoint(&aut.finals) {
                trace!("Rejecting macrostate {successor:?} reached over {next_word:?}");
                if let Some(cex) = cex.as_mut() {
                    **cex = next_word;
                }

                return Ok(false);
            }

            if antichain.insert((), &successor) {
                worklist.push_back((successor, next_word));
            }
        }
    }

    Ok(true)
}

fn is_universal_classical(
    aut: &Nfa,
    alphabet: &Alphabet,
    cex: Option<&mut Word>,
) -> Result<bool, AutomatonError> {
    // The automaton is universal iff its complement accepts nothing.
    let params = Params::from([("algo".to_string(), ALGO_CLASSICAL.to_string())]);
    let complemented = complement(aut, alphabet, &params, None)?;

    let mut word = Word::new();
    if is_lang_empty_cex(&complemented, &mut word) {
        return Ok(true);
    }

    if let Some(cex) = cex {
        *cex = word;
    }

    Ok(false)
}

fn is_incl_antichains(smaller: &Nfa, bigger: &Nfa, mut cex: Option<&mut Word>) -> Result<bool, AutomatonError> {
    let mut antichain: Antichain<State> = Antichain::new();

    // Pairs of a state of the smaller automaton and the macrostate of the
    // bigger automaton reached over the same word.
    let mut worklist: VecDeque<(State, StateSet, Word)> = VecDeque::new();

    for &state in &smaller.initial {
        if smaller.has_final(state) && bigger.initial.is_disjoint(&bigger.finals) {
            if let Some(cex) = cex.as_mut() {
                // The empty word separates the languages.
                cex.clear();
            }

            return Ok(false);
        }

        if antichain.insert(state, &bigger.initial) {
            worklist.push_back((state, bigger.initial.clone(), Word::new()));
        }
    }

    while let Some((state, macrostate, word)) = worklist.pop_front() {
        for (&symb, targets) in smaller.post_or_empty(state) {
            let successor_macro = bigger.post_on(&macrostate, symb);

            for &tgt in targets {
                let mut next_word = word.clone();
                next_word.push(symb);

                if smaller.has_final(tgt) && successor_macro.is_disjoint(&bigger.finals) {
                    trace!("Separating word {next_word:?} at pair ({tgt}, {successor_macro:?})");
                    if let Some(cex) = cex.as_mut() {
                        **cex = next_word;
                    }

                    return Ok(false);
                }

                if antichain.insert(tgt, &successor_macro) {
                    worklist.push_back((tgt, successor_macro.clone(), next_word));
                }
            }
        }
    }

    Ok(true)
}

fn is_incl_classical(
    smaller: &Nfa,
    bigger: &Nfa,
    alphabet: &Alphabet,
    cex: Option<&mut Word>,
) -> Result<bool, AutomatonError> {
    // Inclusion holds iff nothing is accepted by the smaller automaton and
    // the complement of the bigger one at the same time.
    let params = Params::from([("algo".to_string(), ALGO_CLASSICAL.to_string())]);
    let complemented = complement(bigger, alphabet, &params, None)?;
    let difference = intersection(smaller, &complemented, None);

    let mut word = Word::new();
    if is_lang_empty_cex(&difference, &mut word) {
        return Ok(true);
    }

    if let Some(cex) = cex {
        *cex = word;
    }

    Ok(false)
}
