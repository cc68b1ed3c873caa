//! Single-point, order-preserving crossover of two walks.

use crate::candidate::Candidate;
use fxhash::FxHashSet;
use rand::Rng;

/// Keep a random prefix of `l`, then append holds from `r` in `r`'s order, skipping any already
/// taken, until the child is as long as the longer parent or `r` runs out.
///
/// If either parent has fewer than two holds there is no interior cut point, and the child is a
/// copy of `l`.
pub fn crossover(l: &Candidate, r: &Candidate, rng: &mut impl Rng) -> Candidate {
    if l.len() < 2 || r.len() < 2 {
        return l.clone();
    }

    let cut = rng.random_range(1..l.len().min(r.len()));
    let limit = l.len().max(r.len());

    let mut child = l.ids()[..cut].to_vec();
    let mut taken = child.iter().copied().collect::<FxHashSet<_>>();
    for id in r.ids() {
        if child.len() >= limit {
            break;
        }
        if taken.insert(*id) {
            child.push(*id);
        }
    }

    Candidate::from_walk(child)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::Board;
    use rand::{rngs::StdRng, SeedableRng};

    fn walk(board: &Board, ids: &[u32]) -> Candidate {
        Candidate::new(ids.to_vec(), board).unwrap()
    }

    #[test]
    fn test_degenerate_parents_copy_left() {
        let board = Board::grid_uniform(5, 5, 0.5);
        let mut rng = StdRng::seed_from_u64(0);
        let single = walk(&board, &[3]);
        let long = walk(&board, &[0, 6, 12, 18]);

        assert_eq!(single, crossover(&single, &long, &mut rng));
        assert_eq!(long, crossover(&long, &single, &mut rng));
    }

    #[test]
    fn test_child_invariants() {
        let board = Board::grid_uniform(5, 5, 0.5);
        let mut rng = StdRng::seed_from_u64(1);
        let pairs = [
            (walk(&board, &[0, 6, 12, 18, 24]), walk(&board, &[4, 8, 12, 16, 20])),
            (walk(&board, &[1, 2]), walk(&board, &[2, 1, 7, 13, 19, 24])),
            (walk(&board, &[0, 5, 10, 15, 20, 21, 22]), walk(&board, &[0, 5, 10])),
        ];

        for (l, r) in pairs.iter() {
            for _ in 0..100 {
                let child = crossover(l, r, &mut rng);
                let ids = child.ids();
                assert!(child.len() <= l.len().max(r.len()));
                assert_eq!(
                    ids.len(),
                    ids.iter().collect::<FxHashSet<_>>().len(),
                    "duplicate in {ids:?}"
                );
                // the child always starts where the left parent does
                assert_eq!(l.first(), child.first());
                assert!(ids.iter().all(|id| l.contains(*id) || r.contains(*id)));
            }
        }
    }

    #[test]
    fn test_prefix_then_right_order() {
        let board = Board::grid_uniform(5, 5, 0.5);
        let mut rng = StdRng::seed_from_u64(2);
        let l = walk(&board, &[0, 1, 2]);
        let r = walk(&board, &[10, 11, 12]);

        // every cut in 1..3 yields l's prefix followed by r's head
        for _ in 0..50 {
            let child = crossover(&l, &r, &mut rng);
            assert_eq!(3, child.len());
            let cut = child.ids().iter().take_while(|id| **id < 10).count();
            assert!((1..3).contains(&cut));
            assert_eq!(&l.ids()[..cut], &child.ids()[..cut]);
            assert_eq!(&r.ids()[..3 - cut], &child.ids()[cut..]);
        }
    }

    #[test]
    fn test_right_parent_exhausted() {
        let board = Board::grid_uniform(5, 5, 0.5);
        let mut rng = StdRng::seed_from_u64(3);
        // r holds nothing new beyond the prefix, so the child can come up short
        let l = walk(&board, &[0, 1, 2, 3, 4]);
        let r = walk(&board, &[1, 0]);
        let child = crossover(&l, &r, &mut rng);
        assert_eq!(&[0, 1], child.ids());
    }
}
