//! Random walks up the board, used to seed the population.

use crate::{
    board::{Board, Hold, HoldId},
    candidate::Candidate,
    constants::{CRUX_MAX_DROP, CRUX_MAX_STEP, CRUX_MIN_STEP, CRUX_START_BAND},
};
use fxhash::FxHashSet;
use rand::{seq::IndexedRandom, Rng};

/// Whether `next` is a legal move from `current` for a constructed walk: not too far below, and
/// strictly between the minimum and maximum step length away.
#[inline]
pub fn reachable(current: &Hold, next: &Hold) -> bool {
    if next.y < current.y - CRUX_MAX_DROP {
        return false;
    }
    let d = current.distance(next);
    CRUX_MIN_STEP < d && d < CRUX_MAX_STEP
}

/// Walk from a random start hold below [CRUX_START_BAND], adding up to `target_length` holds.
///
/// Each step picks uniformly among unused holds [reachable] from the current one. The walk stops
/// early when nothing qualifies, so it may come back shorter than asked for. Returns `None` only
/// when the board has no start holds at all.
pub fn build_random_route(
    board: &Board,
    target_length: usize,
    rng: &mut impl Rng,
) -> Option<Candidate> {
    let start = *board.below(CRUX_START_BAND).choose(rng)?;

    let mut walk = vec![start];
    let mut used = FxHashSet::from_iter([start]);
    let mut current = &board[start];

    for _ in 0..target_length {
        let options = board
            .iter()
            .filter(|hold| !used.contains(&hold.id) && reachable(current, hold))
            .collect::<Vec<_>>();

        let Some(&next) = options.choose(rng) else {
            break;
        };
        walk.push(next.id);
        used.insert(next.id);
        current = next;
    }

    Some(Candidate::from_walk(walk))
}

/// Ids of the holds a walk of this board may start from
pub fn start_holds(board: &Board) -> Vec<HoldId> {
    board.below(CRUX_START_BAND)
}
