//! The algebraic representation of terms and formulae for the prover core:
//! structural equality, substitution, free-variable queries and
//! instantiation-time tagging.
//!
//! Terms form an algebra and pattern matching on the sum is the dominant
//! operation throughout this crate.

use lalrpop_intern::InternedString;

pub mod formula;
pub mod pretty;
pub mod subst;
pub mod term;
pub mod vars;
pub mod wf;

pub use formula::Formula;
pub use term::{FnApp, Term, Var};
pub use wf::MalformedInput;

/// A term or formula name. Interning keeps clones of deeply-shared
/// sub-formulae cheap, the same role it plays for type and trait names in
/// the solver this crate is modelled on.
pub type Identifier = InternedString;

/// A non-negative integer tagging when a variable or metavariable was
/// introduced. See `term::Var::time` and `Formula::set_instantiation_time`.
pub type Time = u32;

pub fn intern(name: &str) -> Identifier {
    lalrpop_intern::intern(name)
}
