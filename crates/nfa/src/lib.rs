#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod alphabet;
mod construct;
mod determinize;
mod error;
mod inclusion;
mod minimize;
mod nfa;
mod product;
mod queries;
mod random_nfa;
mod section;
mod transform;
mod traversal;

pub use alphabet::*;
pub use construct::*;
pub use determinize::*;
pub use error::*;
pub use inclusion::*;
pub use minimize::*;
pub use nfa::*;
pub use product::*;
pub use queries::*;
pub use random_nfa::*;
pub use section::*;
pub use transform::*;
pub use traversal::*;
