use thiserror::Error;

use crate::State;
use crate::Symbol;

/// Errors surfaced to callers of the automata kernel.
///
/// Structural input errors and unsupported alphabet operations are reported
/// through this type; internal invariant violations are assertions instead.
/// An automaton that was being constructed when an error occurred must be
/// considered invalid.
#[derive(Error, Debug)]
pub enum AutomatonError {
    #[error("expecting type \"NFA\", found \"{0}\"")]
    UnexpectedType(String),

    #[error("epsilon transitions not supported: {0:?}")]
    EpsilonTransition(Vec<String>),

    #[error("invalid transition: {0:?}")]
    InvalidTransition(Vec<String>),

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("multiple occurrence of the same symbol '{0}'")]
    DuplicateSymbol(String),

    #[error("could not parse '{0}' as a symbol number")]
    InvalidSymbolNumber(String),

    #[error("cannot translate state {0}")]
    UntranslatableState(State),

    #[error("cannot translate symbol {0}")]
    UntranslatableSymbol(Symbol),

    #[error("encountered a symbol that is not in the provided alphabet: {0}")]
    SymbolNotInAlphabet(Symbol),

    #[error("the {alphabet} alphabet does not support {operation}")]
    UnsupportedOperation {
        alphabet: &'static str,
        operation: &'static str,
    },

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}
