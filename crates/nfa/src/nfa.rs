use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use runa_utilities::TagIndex;
use runa_utilities::VecSet;
use rustc_hash::FxHashMap;

/// A unique type for the states of an automaton.
pub struct StateTag;

/// A unique type for the symbols of an alphabet.
pub struct SymbolTag;

/// The index type for a state.
pub type State = TagIndex<usize, StateTag>;

/// The index type for a symbol.
pub type Symbol = TagIndex<usize, SymbolTag>;

/// A set of states, iterated in ascending order of state index.
pub type StateSet = VecSet<State>;

/// The outgoing transitions of a single state: for every symbol the set of
/// target states reached over it.
pub type SymbolPost = BTreeMap<Symbol, StateSet>;

/// A finite-length path of states through an automaton.
pub type Path = Vec<State>;

/// A finite-length word of symbols.
pub type Word = Vec<Symbol>;

/// Mapping of state names to state indices.
pub type StateDict = FxHashMap<String, State>;

/// Mapping of symbol names to symbol indices.
pub type SymbolDict = FxHashMap<String, Symbol>;

/// Configuration parameters for algorithm selection, a flat mapping from
/// option names to values. Unknown keys are tolerated by every consumer.
pub type Params = HashMap<String, String>;

/// The section type of automata handled by this crate.
pub const TYPE_NFA: &str = "NFA";

/// The post of a state without outgoing transitions.
static EMPTY_POST: SymbolPost = SymbolPost::new();

/// A single transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Trans {
    pub src: State,
    pub symb: Symbol,
    pub tgt: State,
}

impl Trans {
    /// Constructs a new transition.
    pub fn new(src: State, symb: Symbol, tgt: State) -> Self {
        Self { src, symb, tgt }
    }
}

impl fmt::Display for Trans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.src, self.symb, self.tgt)
    }
}

/// A nondeterministic finite automaton over finite words.
///
/// # Details
///
/// The transition relation is stored as a two-level ordered map from source
/// state to symbol to the set of target states, so iterating over transitions
/// is deterministic: ascending by source state, then symbol, then target. A
/// state may appear in the initial set, the final set, as a source or as a
/// target independently; none of the four roles implies another.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Nfa {
    /// The set of initial states.
    pub initial: StateSet,

    /// The set of final states.
    pub finals: StateSet,

    /// Transitions are kept private such that only nonempty target sets are
    /// ever stored.
    transitions: BTreeMap<State, SymbolPost>,
}

impl Nfa {
    /// Creates an automaton without states and transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an initial state.
    pub fn add_initial(&mut self, state: State) {
        self.initial.insert(state);
    }

    /// Adds every state of the given iterator as an initial state.
    pub fn add_initial_all(&mut self, states: impl IntoIterator<Item = State>) {
        for state in states {
            self.add_initial(state);
        }
    }

    /// Returns true iff the given state is initial.
    pub fn has_initial(&self, state: State) -> bool {
        self.initial.contains(&state)
    }

    /// Adds a final state.
    pub fn add_final(&mut self, state: State) {
        self.finals.insert(state);
    }

    /// Adds every state of the given iterator as a final state.
    pub fn add_final_all(&mut self, states: impl IntoIterator<Item = State>) {
        for state in states {
            self.add_final(state);
        }
    }

    /// Returns true iff the given state is final.
    pub fn has_final(&self, state: State) -> bool {
        self.finals.contains(&state)
    }

    /// Inserts the given transition. Adding an already present transition is
    /// a no-op.
    pub fn add_trans(&mut self, trans: Trans) {
        self.transitions
            .entry(trans.src)
            .or_default()
            .entry(trans.symb)
            .or_default()
            .insert(trans.tgt);
    }

    /// Inserts the transition (src, symb, tgt).
    pub fn add_transition(&mut self, src: State, symb: Symbol, tgt: State) {
        self.add_trans(Trans::new(src, symb, tgt));
    }

    /// Returns true iff the given transition is present.
    pub fn has_trans(&self, trans: &Trans) -> bool {
        self.transitions
            .get(&trans.src)
            .and_then(|post| post.get(&trans.symb))
            .is_some_and(|targets| targets.contains(&trans.tgt))
    }

    /// Returns true iff the transition (src, symb, tgt) is present.
    pub fn has_transition(&self, src: State, symb: Symbol, tgt: State) -> bool {
        self.has_trans(&Trans::new(src, symb, tgt))
    }

    /// Returns true iff the automaton has no transitions.
    pub fn trans_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Returns the number of transitions. Linear in the number of edges, not
    /// cached.
    pub fn trans_size(&self) -> usize {
        self.transitions
            .values()
            .map(|post| post.values().map(|targets| targets.len()).sum::<usize>())
            .sum()
    }

    /// Returns the symbol post of the given state, or None when the state has
    /// no outgoing transitions.
    pub fn post(&self, state: State) -> Option<&SymbolPost> {
        self.transitions.get(&state)
    }

    /// Returns the symbol post of the given state. A state without outgoing
    /// transitions yields the empty post, indistinguishable from an explicit
    /// empty mapping.
    pub fn post_or_empty(&self, state: State) -> &SymbolPost {
        self.post(state).unwrap_or(&EMPTY_POST)
    }

    /// Returns the post of a set of states over a single symbol: the union of
    /// the targets of every member state.
    pub fn post_on(&self, states: &StateSet, symb: Symbol) -> StateSet {
        let mut result = StateSet::new();
        for &state in states {
            if let Some(targets) = self.post_or_empty(state).get(&symb) {
                result.union_with(targets);
            }
        }

        result
    }

    /// Iterates over the states with outgoing transitions together with their
    /// symbol posts, in ascending order of state index.
    pub fn posts(&self) -> impl Iterator<Item = (State, &SymbolPost)> {
        self.transitions.iter().map(|(&src, post)| (src, post))
    }

    /// Iterates over all transitions, ascending by source state, then symbol,
    /// then target. Every transition is visited exactly once.
    pub fn iter(&self) -> impl Iterator<Item = Trans> {
        self.transitions.iter().flat_map(|(&src, post)| {
            post.iter().flat_map(move |(&symb, targets)| {
                debug_assert!(!targets.is_empty(), "Stored target sets are nonempty");
                targets.iter().map(move |&tgt| Trans::new(src, symb, tgt))
            })
        })
    }

    /// Returns every state that appears in the automaton in any role:
    /// initial, final, source or target.
    pub fn states(&self) -> StateSet {
        let mut states: StateSet = self.initial.iter().chain(self.finals.iter()).copied().collect();
        for trans in self.iter() {
            states.insert(trans.src);
            states.insert(trans.tgt);
        }

        states
    }
}

impl fmt::Debug for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial states: {:?}", self.initial)?;
        writeln!(f, "Final states: {:?}", self.finals)?;

        for trans in self.iter() {
            writeln!(f, "{} --[{}]-> {}", trans.src, trans.symb, trans.tgt)?;
        }

        Ok(())
    }
}
