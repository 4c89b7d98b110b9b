//! The unifier (component B) and the breadth-first sequent engine
//! (component C), bundled into one crate since the sequent engine's
//! expansion rules and sibling closure both call directly into the
//! unifier on nearly every step.

#[macro_use]
extern crate tracing;

pub mod engine;
pub mod infer;

pub use engine::search::{Search, SearchConfig};
pub use engine::sequent::Sequent;
pub use infer::unify::{unify, unify_list, Substitution};
