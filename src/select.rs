//! Tournament selection over a scored population.

use core::cmp::Ordering;
use rand::{seq::index::sample, Rng};

/// Order two scores best-first. NaN sorts after every number so it never wins.
#[inline]
pub fn best_first(l: f64, r: f64) -> Ordering {
    match (l.is_nan(), r.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => r.total_cmp(&l),
    }
}

/// Sort a scored population best-first. The sort is stable, so equal scores keep their
/// original relative order.
pub fn rank<T>(scored: &mut [(T, f64)]) {
    scored.sort_by(|(_, l), (_, r)| best_first(*l, *r));
}

/// Draw `size` members (clipped to the population) without replacement and return the fittest.
/// Ties go to the member with the lower index in `scored`. `None` for an empty population.
pub fn tournament<'a, T>(
    scored: &'a [(T, f64)],
    size: usize,
    rng: &mut impl Rng,
) -> Option<&'a T> {
    if scored.is_empty() {
        return None;
    }

    let drawn = sample(rng, scored.len(), size.clamp(1, scored.len()));
    drawn
        .into_iter()
        .min_by(|&l, &r| best_first(scored[l].1, scored[r].1).then(l.cmp(&r)))
        .map(|idx| &scored[idx].0)
}
