//! The chromosome the search operates on: an ordered walk over board holds.

use crate::{
    board::{Board, Hold, HoldId},
    error::{CruxError, Result},
};
use fxhash::FxHashSet;
use serde::Serialize;

/// An ordered, duplicate-free, non-empty sequence of hold ids that all exist on some [Board].
///
/// The operators in this crate only ever produce candidates that satisfy these invariants, so
/// they build them through [Candidate::from_walk]. Anything coming from outside goes through
/// [Candidate::new], which checks them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate(Vec<HoldId>);

impl Candidate {
    pub fn new(ids: Vec<HoldId>, board: &Board) -> Result<Self> {
        if ids.is_empty() {
            return Err(CruxError::EmptyCandidate);
        }

        let mut seen = FxHashSet::default();
        for id in ids.iter() {
            if !board.contains(*id) {
                return Err(CruxError::UnknownHold(*id));
            }
            if !seen.insert(*id) {
                return Err(CruxError::DuplicateHold(*id));
            }
        }

        Ok(Self(ids))
    }

    /// Wrap a sequence an operator built from board holds without reusing any
    pub(crate) fn from_walk(ids: Vec<HoldId>) -> Self {
        debug_assert!(!ids.is_empty(), "empty walk");
        debug_assert!(
            ids.iter().collect::<FxHashSet<_>>().len() == ids.len(),
            "walk revisits a hold: {ids:?}"
        );
        Self(ids)
    }

    #[inline]
    pub fn ids(&self) -> &[HoldId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, kept for parity with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn first(&self) -> HoldId {
        self.0[0]
    }

    #[inline]
    pub fn last(&self) -> HoldId {
        self.0[self.0.len() - 1]
    }

    #[inline]
    pub fn contains(&self, id: HoldId) -> bool {
        self.0.contains(&id)
    }

    /// Resolve ids against `board`. Panics if the candidate was built for a different board.
    pub fn holds<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = &'a Hold> + 'a {
        self.0.iter().map(move |id| &board[*id])
    }

    pub fn into_inner(self) -> Vec<HoldId> {
        self.0
    }
}

impl AsRef<[HoldId]> for Candidate {
    fn as_ref(&self) -> &[HoldId] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_validates() {
        let board = Board::grid_uniform(3, 3, 0.5);
        let candidate = Candidate::new(vec![0, 4, 8], &board).unwrap();
        assert_eq!(&[0, 4, 8], candidate.ids());
        assert_eq!(0, candidate.first());
        assert_eq!(8, candidate.last());
        assert!(candidate.contains(4));
        assert!(!candidate.contains(5));

        assert!(matches!(
            Candidate::new(vec![], &board),
            Err(CruxError::EmptyCandidate)
        ));
        assert!(matches!(
            Candidate::new(vec![0, 9], &board),
            Err(CruxError::UnknownHold(9))
        ));
        assert!(matches!(
            Candidate::new(vec![0, 1, 0], &board),
            Err(CruxError::DuplicateHold(0))
        ));
    }

    #[test]
    fn test_holds_resolve_in_order() {
        let board = Board::grid_uniform(3, 3, 0.5);
        let candidate = Candidate::new(vec![6, 3, 0], &board).unwrap();
        let ys = candidate.holds(&board).map(|h| h.y).collect::<Vec<_>>();
        assert_eq!(vec![1., 0.5, 0.], ys);
    }
}
