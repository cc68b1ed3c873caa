//! Random number plumbing for a run: a small seedable generator, entropy seeding, and the
//! probability binding the evolution driver rolls its events against.
//!
//! Probabilities are expressed as `u64` thresholds: an event happens when a raw `next_u64` roll
//! falls below its threshold.

use crate::mutate::MutationKind;
use core::cmp::min;
use log::warn;
use rand::RngCore;
use std::{
    fs::File,
    io::{self, Read},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionEvent {
    /// a freshly bred child gets mutated
    Mutate,
}

pub const fn percent(x: u64) -> u64 {
    x * (u64::MAX / 100)
}

/// Map a probability in `[0, 1]` onto a `u64` threshold, clamping anything outside that range
pub fn threshold(p: f64) -> u64 {
    if p >= 1. {
        u64::MAX
    } else if p <= 0. || p.is_nan() {
        0
    } else {
        (p * u64::MAX as f64) as u64
    }
}

/// Cumulative thresholds for picking one [MutationKind] out of four
#[derive(Debug, Clone, PartialEq)]
pub struct MutationBreakdown {
    choices: [(MutationKind, u64); 4],
    fallback: MutationKind,
}

impl MutationBreakdown {
    /// Build from relative weights ordered replace, insert, remove, swap. Non-positive weights
    /// never fire; if every weight is non-positive the kinds are picked uniformly.
    pub fn new(weights: [f64; 4]) -> Self {
        let weights = weights.map(|w| if w.is_finite() && w > 0. { w } else { 0. });
        let weights = if weights.iter().sum::<f64>() > 0. {
            weights
        } else {
            [1.; 4]
        };
        let total = weights.iter().sum::<f64>();

        let mut choices = [(MutationKind::Replace, 0); 4];
        let mut fallback = MutationKind::Replace;
        let mut acc = 0.;
        for (idx, kind) in MutationKind::ALL.into_iter().enumerate() {
            acc += weights[idx];
            choices[idx] = (kind, threshold(acc / total));
            if weights[idx] > 0. {
                fallback = kind;
            }
        }
        Self { choices, fallback }
    }

    pub fn choices(&self) -> &[(MutationKind, u64); 4] {
        &self.choices
    }

    pub fn pick(&self, roll: u64) -> MutationKind {
        self.choices
            .iter()
            .find_map(|(kind, p)| (roll < *p).then_some(*kind))
            .unwrap_or(self.fallback)
    }
}

impl Default for MutationBreakdown {
    fn default() -> Self {
        Self::new([1.; 4])
    }
}

pub trait Probabilities {
    fn probability(&self, evt: EvolutionEvent) -> u64;
    fn breakdown(&self) -> &MutationBreakdown;
}

pub trait Happens: RngCore + Probabilities {
    fn happens(&mut self, evt: EvolutionEvent) -> bool;
    fn pick_mutation(&mut self) -> MutationKind;
}

impl<T: RngCore + Probabilities> Happens for T {
    fn happens(&mut self, evt: EvolutionEvent) -> bool {
        self.probability(evt) > self.next_u64()
    }

    fn pick_mutation(&mut self) -> MutationKind {
        let roll = self.next_u64();
        self.breakdown().pick(roll)
    }
}

#[derive(Debug, Clone)]
pub struct ProbStatic {
    mutate: u64,
    breakdown: MutationBreakdown,
}

impl ProbStatic {
    pub fn new(mutation_rate: f64, mutation_weights: [f64; 4]) -> Self {
        Self {
            mutate: threshold(mutation_rate),
            breakdown: MutationBreakdown::new(mutation_weights),
        }
    }
}

impl Default for ProbStatic {
    fn default() -> Self {
        Self {
            mutate: percent(20),
            breakdown: MutationBreakdown::default(),
        }
    }
}

impl Probabilities for ProbStatic {
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        match evt {
            EvolutionEvent::Mutate => self.mutate,
        }
    }

    fn breakdown(&self) -> &MutationBreakdown {
        &self.breakdown
    }
}

/// wyrand, a tiny generator whose stream depends only on its seed
#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_le_bytes()[..lim]);
            idx += lim;
        }
    }
}

/// Couples a set of [Probabilities] with the single generator a run draws from
pub struct ProbBinding<P: Probabilities, R: RngCore> {
    p: P,
    r: R,
}

impl<P: Probabilities, R: RngCore> ProbBinding<P, R> {
    pub fn new(p: P, r: R) -> Self {
        Self { p, r }
    }
}

impl<P: Probabilities, R: RngCore> Probabilities for ProbBinding<P, R> {
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        self.p.probability(evt)
    }

    fn breakdown(&self) -> &MutationBreakdown {
        self.p.breakdown()
    }
}

impl<P: Probabilities, R: RngCore> RngCore for ProbBinding<P, R> {
    fn next_u32(&mut self) -> u32 {
        self.r.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.r.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.r.fill_bytes(dest)
    }
}

pub fn seed_urandom() -> io::Result<u64> {
    let mut file = File::open("/dev/urandom")?;
    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

/// A fresh seed for unseeded runs. Falls back to the thread rng where `/dev/urandom` is missing.
pub fn entropy_seed() -> u64 {
    seed_urandom().unwrap_or_else(|e| {
        warn!("cannot read /dev/urandom ({e}), seeding from thread rng");
        rand::random()
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use core::iter::once;

    fn assert_within_deviation(chance: f64, range: f64, mut roll: impl FnMut() -> bool) {
        let samples = 10_000.;
        let expected = chance * samples;
        let max_deviation = expected * range;
        for _ in 0..20 {
            let incidence = once(())
                .cycle()
                .take(samples as usize)
                .filter(|()| roll())
                .count() as f64;
            assert!(
                (expected - incidence).abs() < max_deviation,
                "{incidence} != {expected} ± {max_deviation}"
            );
        }
    }

    #[test]
    fn test_deviation_wyrand() {
        let mut p_bind = ProbBinding::new(ProbStatic::default(), WyRng::seeded(0xC0FFEE));
        assert_within_deviation(0.2, 0.33, || p_bind.happens(EvolutionEvent::Mutate));
    }

    #[test]
    fn test_breakdown_uniform() {
        let mut p_bind = ProbBinding::new(ProbStatic::default(), WyRng::seeded(7));
        for kind in MutationKind::ALL {
            let mut rng = WyRng::seeded(kind as u64 + 11);
            let breakdown = MutationBreakdown::default();
            assert_within_deviation(0.25, 0.33, || breakdown.pick(rng.next_u64()) == kind);
        }
        // every kind is reachable through the binding too
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[p_bind.pick_mutation() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_breakdown_weighted() {
        let breakdown = MutationBreakdown::new([0., 1., 0., 3.]);
        let mut rng = WyRng::seeded(3);
        for _ in 0..1000 {
            let kind = breakdown.pick(rng.next_u64());
            assert!(matches!(kind, MutationKind::Insert | MutationKind::Swap));
        }
        assert_eq!(MutationKind::Swap, breakdown.pick(u64::MAX));
    }

    #[test]
    fn test_breakdown_degenerate_weights() {
        let breakdown = MutationBreakdown::new([0., -1., f64::NAN, 0.]);
        assert_eq!(breakdown, MutationBreakdown::default());
    }

    #[test]
    fn test_threshold() {
        assert_eq!(0, threshold(0.));
        assert_eq!(0, threshold(-3.));
        assert_eq!(u64::MAX, threshold(1.));
        assert_eq!(u64::MAX, threshold(12.));
        let half = threshold(0.5);
        assert!(half > percent(49) && half < percent(51));
    }

    #[test]
    fn test_wyrng_deterministic() {
        let mut l = WyRng::seeded(42);
        let mut r = WyRng::seeded(42);
        for _ in 0..100 {
            assert_eq!(l.next_u64(), r.next_u64());
        }
        assert_ne!(WyRng::seeded(1).next_u64(), WyRng::seeded(2).next_u64());
    }

    #[test]
    fn test_fill_bytes() {
        let mut rng = WyRng::seeded(9);
        let expected = WyRng::seeded(9).next_u64().to_le_bytes();
        let mut dst = [0u8; 13];
        rng.fill_bytes(&mut dst);
        assert_eq!(expected, dst[..8]);
        assert!(dst[8..].iter().any(|b| *b != 0));

        let mut empty: [u8; 0] = [];
        rng.fill_bytes(&mut empty);
    }
}
