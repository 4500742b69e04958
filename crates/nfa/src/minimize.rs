use log::debug;

use crate::Nfa;
use crate::Params;
use crate::determinize;
use crate::revert;

/// Minimizes the automaton using Brzozowski's construction: reverse,
/// determinize, reverse and determinize again.
///
/// # Details
///
/// The automaton is assumed to contain no useless states; callers that need a
/// canonical minimal form should trim first. The parameters currently select
/// no other algorithm and are ignored.
pub fn minimize(aut: &Nfa, params: &Params) -> Nfa {
    if params.contains_key("algo") {
        debug!("Ignoring the minimization algorithm parameter and using the default");
    }

    let halfway = determinize(&revert(aut));
    determinize(&revert(&halfway))
}
