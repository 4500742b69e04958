use rand::Rng;

use crate::Nfa;
use crate::State;
use crate::Symbol;
use crate::Word;

/// Generates a random automaton with the desired number of states and
/// symbols, and the given bound on the out degree of every state.
///
/// State 0 is always initial; every state is final with small probability.
pub fn random_nfa(rng: &mut impl Rng, num_of_states: usize, num_of_symbols: usize, outdegree: usize) -> Nfa {
    let mut aut = Nfa::new();
    aut.add_initial(State::new(0));

    for state in 0..num_of_states {
        if rng.random_bool(0.2) {
            aut.add_final(State::new(state));
        }

        for _ in 0..rng.random_range(0..outdegree) {
            let symb = rng.random_range(0..num_of_symbols);
            let tgt = rng.random_range(0..num_of_states);
            aut.add_transition(State::new(state), Symbol::new(symb), State::new(tgt));
        }
    }

    aut
}

/// Generates random words over the given number of symbols, up to the given
/// length. The empty word is always included.
pub fn random_words(rng: &mut impl Rng, num_of_symbols: usize, max_length: usize, count: usize) -> Vec<Word> {
    let mut words = vec![Word::new()];
    for _ in 0..count {
        let length = rng.random_range(0..=max_length);
        words.push(
            (0..length)
                .map(|_| Symbol::new(rng.random_range(0..num_of_symbols)))
                .collect(),
        );
    }

    words
}
