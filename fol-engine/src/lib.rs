//! Shared vocabulary used by both the unifier and the sequent engine: a
//! small, dependency-light crate defining the result types everyone else
//! agrees on, so that upstream crates can speak `Fallible` without
//! depending on the heavier crate that actually drives a search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The distinguished "no unifier" / "no solution" result. Not an error in
/// the reporting sense: it carries no message and is never logged as a
/// failure, only matched on to drive the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NoSolution;

/// Result alias used throughout the unifier and the sequent engine.
pub type Fallible<T> = Result<T, NoSolution>;

/// The two-valued result of `prove`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Proven,
    /// A branch got stuck: no non-atomic formula remained and no closing
    /// unifier existed. Reported as plain `false` at the public boundary.
    Stuck,
}

/// The three-valued result of `prove_or_disprove`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Proven,
    Refuted,
    /// Neither the goal nor its negation could be closed.
    Independent,
}

/// What one call to `Search::step` produced.
///
/// Cooperative interleaving of two searches is built on top of this as an
/// explicit state machine rather than a coroutine: the driver calls `step`
/// on one search, then the other, in turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    Running,
    Closed(bool),
    /// The step budget (if any) was exhausted before a verdict was reached.
    Diverging,
    /// The caller asked the search to stop via its `Cancellation` token.
    Cancelled,
}

/// A cheaply-cloned flag a caller can use to ask a running search to stop.
///
/// Checked only at step boundaries: cancelling never interrupts a step
/// already in progress, and no partial state is salvaged afterwards.
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Cancellation(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_observed_after_clone() {
        let token = Cancellation::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
