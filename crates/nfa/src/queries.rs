use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::Alphabet;
use crate::AutomatonError;
use crate::Nfa;
use crate::Path;
use crate::State;
use crate::Symbol;
use crate::Word;
use crate::shortest_accepting_path;
use crate::word_for_path;

/// Returns true iff the language of the automaton is empty. When it is not
/// and a sink is supplied, the sink receives a shortest state path from an
/// initial to a final state.
pub fn is_lang_empty(aut: &Nfa, cex: Option<&mut Path>) -> bool {
    match shortest_accepting_path(aut) {
        None => true,
        Some(path) => {
            if let Some(cex) = cex {
                *cex = path;
            }

            false
        }
    }
}

/// Returns true iff the language of the automaton is empty; otherwise `cex`
/// receives a word accepted by the automaton.
pub fn is_lang_empty_cex(aut: &Nfa, cex: &mut Word) -> bool {
    let mut path = Path::new();
    if is_lang_empty(aut, Some(&mut path)) {
        return true;
    }

    let (word, consistent) = word_for_path(aut, &path);
    assert!(consistent, "An accepting path always spells a word");
    *cex = word;
    false
}

/// Returns true iff the automaton accepts the given word.
pub fn is_in_lang(aut: &Nfa, word: &Word) -> bool {
    let mut current = aut.initial.clone();
    for &symb in word {
        current = aut.post_on(&current, symb);
        if current.is_empty() {
            return false;
        }
    }

    !current.is_disjoint(&aut.finals)
}

/// Returns true iff some prefix of the given word, including the empty and
/// the full one, is accepted by the automaton.
pub fn is_prfx_in_lang(aut: &Nfa, word: &Word) -> bool {
    let mut current = aut.initial.clone();
    for &symb in word {
        if !current.is_disjoint(&aut.finals) {
            return true;
        }

        current = aut.post_on(&current, symb);
        if current.is_empty() {
            return false;
        }
    }

    !current.is_disjoint(&aut.finals)
}

/// Returns true iff the automaton accepts the empty word.
pub fn accepts_epsilon(aut: &Nfa) -> bool {
    !aut.initial.is_disjoint(&aut.finals)
}

/// Tests whether the automaton is deterministic: exactly one initial state
/// and exactly one target for every source state and symbol. The whole
/// automaton is checked, not only the reachable part.
pub fn is_deterministic(aut: &Nfa) -> bool {
    if aut.initial.len() != 1 {
        return false;
    }

    aut.posts()
        .all(|(_, post)| post.values().all(|targets| targets.len() == 1))
}

/// Tests whether the automaton is complete with respect to the alphabet:
/// every reachable state must have an outgoing transition over every symbol.
///
/// A transition over a symbol outside the alphabet is an error.
pub fn is_complete(aut: &Nfa, alphabet: &Alphabet) -> Result<bool, AutomatonError> {
    let symbols: FxHashSet<Symbol> = alphabet.symbols()?.into_iter().collect();

    let mut worklist: VecDeque<State> = aut.initial.iter().copied().collect();
    let mut processed: FxHashSet<State> = aut.initial.iter().copied().collect();

    while let Some(state) = worklist.pop_front() {
        let mut used_symbols = 0;
        for (symb, targets) in aut.post_or_empty(state) {
            if !symbols.contains(symb) {
                return Err(AutomatonError::SymbolNotInAlphabet(*symb));
            }

            used_symbols += 1;
            for &tgt in targets {
                if processed.insert(tgt) {
                    worklist.push_back(tgt);
                }
            }
        }

        if used_symbols != symbols.len() {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Returns true iff no state appears in both automata, in any role.
pub fn are_state_disjoint(lhs: &Nfa, rhs: &Nfa) -> bool {
    lhs.states().is_disjoint(&rhs.states())
}
