use std::fmt;

use fol_ir::vars::{free_metavars, free_vars};
use fol_ir::{intern, Formula, Identifier};
use rustc_hash::{FxHashMap, FxHashSet};

/// A sequent's own global expansion depth, and the per-formula depth
/// stored alongside each formula in `left`/`right`.
pub type Depth = u32;

/// Index into `Search`'s sequent arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SequentId(pub(crate) usize);

/// Index into `Search`'s sibling-group arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SiblingGroupId(pub(crate) usize);

/// A shared set of sequents that must all be closed simultaneously by one
/// unifier.
#[derive(Clone, Debug, Default)]
pub struct SiblingGroup {
    pub members: FxHashSet<SequentId>,
}

/// `left ⊢ right`, where each side is a mapping from formula to the depth
/// at which it was produced.
#[derive(Clone, Debug)]
pub struct Sequent {
    pub left: FxHashMap<Formula, Depth>,
    pub right: FxHashMap<Formula, Depth>,
    pub siblings: Option<SiblingGroupId>,
    pub depth: Depth,
}

impl Sequent {
    pub fn new(left: FxHashMap<Formula, Depth>, right: FxHashMap<Formula, Depth>) -> Self {
        Sequent {
            left,
            right,
            siblings: None,
            depth: 0,
        }
    }

    /// Re-inserting an existing formula with a smaller depth keeps the
    /// smaller depth.
    pub fn insert_left(&mut self, f: Formula, depth: Depth) {
        insert_min(&mut self.left, f, depth);
    }

    pub fn insert_right(&mut self, f: Formula, depth: Depth) {
        insert_min(&mut self.right, f, depth);
    }
}

pub(crate) fn insert_min(map: &mut FxHashMap<Formula, Depth>, f: Formula, depth: Depth) {
    map.entry(f)
        .and_modify(|existing| {
            if depth < *existing {
                *existing = depth;
            }
        })
        .or_insert(depth);
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: Vec<String> = self.left.keys().map(|x| x.to_string()).collect();
        let right: Vec<String> = self.right.keys().map(|x| x.to_string()).collect();
        write!(f, "{} ⊢ {}", left.join(", "), right.join(", "))
    }
}

/// Which side of a sequent an expansion candidate was found on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Picks the lowest-depth non-atomic formula from `left` and from
/// `right`, then applies the side with the smaller depth, breaking ties in
/// favour of the right.
pub fn pick_expansion_candidate(seq: &Sequent) -> Option<(Side, Formula)> {
    let left_candidate = seq
        .left
        .iter()
        .filter(|(f, _)| !f.is_atomic())
        .min_by_key(|(_, d)| **d);
    let right_candidate = seq
        .right
        .iter()
        .filter(|(f, _)| !f.is_atomic())
        .min_by_key(|(_, d)| **d);
    match (left_candidate, right_candidate) {
        (None, None) => None,
        (Some((f, _)), None) => Some((Side::Left, f.clone())),
        (None, Some((f, _))) => Some((Side::Right, f.clone())),
        (Some((fl, dl)), Some((fr, dr))) => {
            if dl < dr {
                Some((Side::Left, fl.clone()))
            } else {
                Some((Side::Right, fr.clone()))
            }
        }
    }
}

/// Consults the sequent's combined free-variable/free-metavariable set and
/// picks the lowest-indexed unused name `{prefix}1, {prefix}2, …`.
pub fn fresh_name(seq: &Sequent, prefix: &str) -> Identifier {
    let mut used: FxHashSet<Identifier> = FxHashSet::default();
    for formula in seq.left.keys().chain(seq.right.keys()) {
        used.extend(free_vars(formula));
        used.extend(free_metavars(formula));
    }
    let mut index = 1usize;
    loop {
        let candidate = intern(&format!("{}{}", prefix, index));
        if !used.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}
