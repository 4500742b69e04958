use rustc_hash::FxHashMap;

use crate::Alphabet;
use crate::AutomatonError;
use crate::Nfa;
use crate::OnTheFlyAlphabet;
use crate::ParsedSection;
use crate::State;
use crate::StateDict;
use crate::Symbol;
use crate::SymbolDict;
use crate::TYPE_NFA;
use crate::Word;

/// Translates a state name, allocating the next free index on its first
/// occurrence.
fn state_of(state_dict: &mut StateDict, next_state: &mut usize, name: &str) -> State {
    if let Some(&state) = state_dict.get(name) {
        return state;
    }

    let state = State::new(*next_state);
    *next_state += 1;
    state_dict.insert(name.to_string(), state);
    state
}

/// Builds an automaton from a parsed section of type "NFA".
///
/// # Details
///
/// Symbol names are translated through the given alphabet. State names are
/// translated through `state_dict` when it is supplied, so the caller can
/// relate the states of the result back to their names; otherwise an internal
/// dictionary is allocated and discarded. Initial and final states come from
/// the "Initial" and "Final" dictionary entries, and every body row must hold
/// exactly the source name, the symbol name and the target name.
pub fn construct(
    parsec: &ParsedSection,
    alphabet: &mut Alphabet,
    state_dict: Option<&mut StateDict>,
) -> Result<Nfa, AutomatonError> {
    if parsec.section_type != TYPE_NFA {
        return Err(AutomatonError::UnexpectedType(parsec.section_type.clone()));
    }

    let mut owned_states = StateDict::default();
    let state_dict = state_dict.unwrap_or(&mut owned_states);
    let mut next_state = state_dict.values().map(|state| state.value() + 1).max().unwrap_or(0);

    let mut aut = Nfa::new();

    for name in parsec.dict.get("Initial").into_iter().flatten() {
        let state = state_of(state_dict, &mut next_state, name);
        aut.add_initial(state);
    }

    for name in parsec.dict.get("Final").into_iter().flatten() {
        let state = state_of(state_dict, &mut next_state, name);
        aut.add_final(state);
    }

    for row in &parsec.body {
        let [src_name, symb_name, tgt_name] = row.as_slice() else {
            if row.len() == 2 {
                return Err(AutomatonError::EpsilonTransition(row.clone()));
            }

            return Err(AutomatonError::InvalidTransition(row.clone()));
        };

        let src = state_of(state_dict, &mut next_state, src_name);
        let symb = alphabet.translate(symb_name)?;
        let tgt = state_of(state_dict, &mut next_state, tgt_name);

        aut.add_transition(src, symb, tgt);
    }

    Ok(aut)
}

/// Builds an automaton from a parsed section, interning symbol names on the
/// fly into `symbol_dict` (or into an internal dictionary when absent).
pub fn construct_with_dict(
    parsec: &ParsedSection,
    symbol_dict: Option<&mut SymbolDict>,
    state_dict: Option<&mut StateDict>,
) -> Result<Nfa, AutomatonError> {
    let mut owned_symbols = SymbolDict::default();
    let symbol_dict = symbol_dict.unwrap_or(&mut owned_symbols);

    let mut alphabet = Alphabet::OnTheFly(OnTheFlyAlphabet::new(symbol_dict));
    construct(parsec, &mut alphabet, state_dict)
}

/// Renders the automaton as a parsed section of type "NFA", with one body row
/// per transition in iteration order.
///
/// When a name map is supplied it must cover every state respectively symbol
/// of the automaton; otherwise states render as `q<index>` and symbols as
/// `a<index>`.
pub fn serialize(
    aut: &Nfa,
    symbol_map: Option<&FxHashMap<Symbol, String>>,
    state_map: Option<&FxHashMap<State, String>>,
) -> Result<ParsedSection, AutomatonError> {
    let state_name = |state: State| -> Result<String, AutomatonError> {
        match state_map {
            None => Ok(format!("q{state}")),
            Some(map) => map
                .get(&state)
                .cloned()
                .ok_or(AutomatonError::UntranslatableState(state)),
        }
    };

    let symbol_name = |symb: Symbol| -> Result<String, AutomatonError> {
        match symbol_map {
            None => Ok(format!("a{symb}")),
            Some(map) => map
                .get(&symb)
                .cloned()
                .ok_or(AutomatonError::UntranslatableSymbol(symb)),
        }
    };

    let mut parsec = ParsedSection {
        section_type: TYPE_NFA.to_string(),
        ..ParsedSection::default()
    };

    let initial: Vec<String> = aut.initial.iter().map(|&state| state_name(state)).collect::<Result<_, _>>()?;
    parsec.dict.insert("Initial".to_string(), initial);

    let finals: Vec<String> = aut.finals.iter().map(|&state| state_name(state)).collect::<Result<_, _>>()?;
    parsec.dict.insert("Final".to_string(), finals);

    for trans in aut.iter() {
        parsec.body.push(vec![
            state_name(trans.src)?,
            symbol_name(trans.symb)?,
            state_name(trans.tgt)?,
        ]);
    }

    Ok(parsec)
}

/// Encodes a sequence of symbol names into a word using the given dictionary.
pub fn encode_word<S: AsRef<str>>(symbol_dict: &SymbolDict, names: &[S]) -> Result<Word, AutomatonError> {
    names
        .iter()
        .map(|name| {
            symbol_dict
                .get(name.as_ref())
                .copied()
                .ok_or_else(|| AutomatonError::UnknownSymbol(name.as_ref().to_string()))
        })
        .collect()
}
