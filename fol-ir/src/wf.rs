use thiserror::Error;

use crate::formula::Formula;
use crate::term::Term;
use crate::Identifier;

/// The one genuine, reportable error kind the core surfaces: input whose
/// term structure violates well-formedness. Unification failures are
/// deliberately *not* part of this type — see `fol_engine::NoSolution`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name `{name}` is not alphanumeric")]
    NonAlphanumericName { name: String },
}

fn check_name(name: Identifier) -> Result<(), MalformedInput> {
    let s = name.to_string();
    if s.is_empty() {
        return Err(MalformedInput::EmptyName);
    }
    if !s.chars().all(|c| c.is_alphanumeric()) {
        return Err(MalformedInput::NonAlphanumericName { name: s });
    }
    Ok(())
}

fn check_term(t: &Term) -> Result<(), MalformedInput> {
    match t {
        Term::Variable(v) | Term::Metavariable(v) => check_name(v.name),
        Term::Function(f) => {
            check_name(f.name)?;
            for arg in f.args.iter() {
                check_term(arg)?;
            }
            Ok(())
        }
    }
}

/// Checks that every name reachable from `f` is non-empty and alphanumeric.
/// Quantifier binders are structurally guaranteed to bind a variable slot
/// because `Forall`/`Exists` carry an `Identifier`, not an arbitrary term —
/// there is no representable state where a bound-variable slot holds a
/// non-Variable.
pub fn check_well_formed(f: &Formula) -> Result<(), MalformedInput> {
    match f {
        Formula::Predicate(name, args) => {
            check_name(*name)?;
            for arg in args.iter() {
                check_term(arg)?;
            }
            Ok(())
        }
        Formula::Not(g) => check_well_formed(g),
        Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
            check_well_formed(a)?;
            check_well_formed(b)
        }
        Formula::Forall(v, body) | Formula::Exists(v, body) => {
            check_name(*v)?;
            check_well_formed(body)
        }
    }
}
