//! Local perturbations of a walk.
//!
//! Every operation leaves the first and last hold in place and touches only interior positions.
//! When an operation's guard fails, or no hold qualifies, the candidate comes back unchanged.

use crate::{
    board::{Board, Hold, HoldId},
    candidate::Candidate,
    constants::{CRUX_INSERT_SLACK, CRUX_INSERT_WINDOW, CRUX_MAX_DROP, CRUX_MAX_STEP},
    random::Happens,
};
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    /// swap an interior hold for a nearby unused one
    Replace,
    /// add an unused hold near the midpoint of two neighbors
    Insert,
    Remove,
    /// exchange two adjacent interior holds
    Swap,
}

impl MutationKind {
    /// In the order mutation weights are given
    pub const ALL: [MutationKind; 4] = [
        MutationKind::Replace,
        MutationKind::Insert,
        MutationKind::Remove,
        MutationKind::Swap,
    ];
}

/// Pick a mutation kind off `rng`'s breakdown and apply it
pub fn mutate<H: Happens>(
    candidate: &Candidate,
    board: &Board,
    target_length: usize,
    rng: &mut H,
) -> Candidate {
    let kind = rng.pick_mutation();
    apply(kind, candidate, board, target_length, rng)
}

/// Apply one specific mutation. `candidate` must belong to `board`.
pub fn apply(
    kind: MutationKind,
    candidate: &Candidate,
    board: &Board,
    target_length: usize,
    rng: &mut impl Rng,
) -> Candidate {
    let ids = candidate.ids();
    let mutated = match kind {
        MutationKind::Replace => replace(ids, board, rng),
        MutationKind::Insert => insert(ids, board, target_length, rng),
        MutationKind::Remove => remove(ids, rng),
        MutationKind::Swap => swap(ids, rng),
    };

    match mutated {
        Some(ids) => Candidate::from_walk(ids),
        None => candidate.clone(),
    }
}

fn unused<'a>(
    ids: &'a [HoldId],
    board: &'a Board,
    keep: impl Fn(&Hold) -> bool,
) -> Vec<&'a Hold> {
    board
        .iter()
        .filter(|hold| !ids.contains(&hold.id) && keep(hold))
        .collect()
}

fn replace(ids: &[HoldId], board: &Board, rng: &mut impl Rng) -> Option<Vec<HoldId>> {
    if ids.len() <= 2 {
        return None;
    }

    let idx = rng.random_range(1..ids.len() - 1);
    let prev = &board[ids[idx - 1]];
    let options = unused(ids, board, |hold| {
        hold.y >= prev.y - CRUX_MAX_DROP && prev.distance(hold) < CRUX_MAX_STEP
    });

    let next = options.choose(rng)?;
    let mut ids = ids.to_vec();
    ids[idx] = next.id;
    Some(ids)
}

fn insert(
    ids: &[HoldId],
    board: &Board,
    target_length: usize,
    rng: &mut impl Rng,
) -> Option<Vec<HoldId>> {
    if ids.len() < 2 || ids.len() >= target_length.saturating_add(CRUX_INSERT_SLACK) {
        return None;
    }

    let idx = rng.random_range(1..ids.len());
    let (l, r) = (&board[ids[idx - 1]], &board[ids[idx]]);
    let (mx, my) = ((l.x + r.x) / 2., (l.y + r.y) / 2.);
    let options = unused(ids, board, |hold| {
        (hold.x - mx).abs() < CRUX_INSERT_WINDOW && (hold.y - my).abs() < CRUX_INSERT_WINDOW
    });

    let next = options.choose(rng)?;
    let mut ids = ids.to_vec();
    ids.insert(idx, next.id);
    Some(ids)
}

fn remove(ids: &[HoldId], rng: &mut impl Rng) -> Option<Vec<HoldId>> {
    if ids.len() <= 3 {
        return None;
    }

    let mut ids = ids.to_vec();
    ids.remove(rng.random_range(1..ids.len() - 1));
    Some(ids)
}

fn swap(ids: &[HoldId], rng: &mut impl Rng) -> Option<Vec<HoldId>> {
    if ids.len() <= 3 {
        return None;
    }

    // both idx and idx + 1 stay interior
    let idx = rng.random_range(1..ids.len() - 2);
    let mut ids = ids.to_vec();
    ids.swap(idx, idx + 1);
    Some(ids)
}
