//! Scoring a candidate walk against a requested style and difficulty.
//!
//! The score is a sum of independent terms, each weighted by a field of [FitnessWeights]:
//!
//! - upward: total height gained, rewarded
//! - spacing: variance of move lengths around a style-dependent target, penalized
//! - size: average hold size, rewarded toward small holds on crimpy routes or large holds when
//!   the style asks for them
//! - length: distance from a difficulty-dependent hold count, penalized
//! - backtrack: moves that go down, penalized
//! - dynamic: long moves on dynamic routes, rewarded
//!
//! Walks shorter than three holds skip all of that and score [FitnessWeights::short_route].

use crate::{
    board::Board,
    candidate::Candidate,
    constants::*,
    style::StyleParams,
};
use serde::{Deserialize, Serialize};

/// Tunable constants of the fitness function. Weights are magnitudes; the sign of each term is
/// fixed by [Evaluator::breakdown].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// score of any walk shorter than `min_len`
    pub short_route: f64,
    pub min_len: usize,
    pub upward: f64,
    pub spacing: f64,
    pub spacing_base: f64,
    pub spacing_per_style: f64,
    pub size: f64,
    pub size_pivot: f64,
    pub length: f64,
    pub length_base: f64,
    pub length_per_difficulty: f64,
    pub backtrack: f64,
    pub dynamic: f64,
    pub long_move: f64,
    /// style levels above this switch on the size and dynamic terms
    pub style_threshold: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            short_route: CRUX_SHORT_ROUTE_SCORE,
            min_len: CRUX_MIN_SCORED_LEN,
            upward: CRUX_UPWARD_WEIGHT,
            spacing: CRUX_SPACING_WEIGHT,
            spacing_base: CRUX_SPACING_BASE,
            spacing_per_style: CRUX_SPACING_PER_STYLE,
            size: CRUX_SIZE_WEIGHT,
            size_pivot: CRUX_SIZE_PIVOT,
            length: CRUX_LENGTH_WEIGHT,
            length_base: CRUX_LENGTH_BASE,
            length_per_difficulty: CRUX_LENGTH_PER_DIFFICULTY,
            backtrack: CRUX_BACKTRACK_WEIGHT,
            dynamic: CRUX_DYNAMIC_WEIGHT,
            long_move: CRUX_LONG_MOVE,
            style_threshold: CRUX_STYLE_THRESHOLD,
        }
    }
}

/// Each weighted term of a score, signed as it contributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FitnessBreakdown {
    pub upward: f64,
    pub spacing: f64,
    pub size: f64,
    pub length: f64,
    pub backtrack: f64,
    pub dynamic: f64,
}

impl FitnessBreakdown {
    pub fn total(&self) -> f64 {
        self.upward + self.spacing + self.size + self.length + self.backtrack + self.dynamic
    }
}

/// Everything a score depends on. Holds only shared references, so one evaluator can score a
/// whole population from several threads.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    pub board: &'a Board,
    pub style: &'a StyleParams,
    pub difficulty: f64,
    pub weights: &'a FitnessWeights,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        board: &'a Board,
        style: &'a StyleParams,
        difficulty: f64,
        weights: &'a FitnessWeights,
    ) -> Self {
        Self {
            board,
            style,
            difficulty,
            weights,
        }
    }

    /// Hold count the length term aims for
    pub fn target_length(&self) -> f64 {
        self.weights.length_base + self.difficulty * self.weights.length_per_difficulty
    }

    /// Move length the spacing term aims for
    pub fn target_spacing(&self) -> f64 {
        self.weights.spacing_base + self.style.avg_move_distance * self.weights.spacing_per_style
    }

    /// Per-term scores, or `None` for walks too short to be scored on their merits
    pub fn breakdown(&self, candidate: &Candidate) -> Option<FitnessBreakdown> {
        let w = self.weights;
        if candidate.len() < w.min_len {
            return None;
        }

        let holds = candidate.holds(self.board).collect::<Vec<_>>();
        let moves = holds
            .windows(2)
            .map(|pair| (pair[1].y - pair[0].y, pair[0].distance(pair[1])))
            .collect::<Vec<_>>();
        let n_moves = moves.len() as f64;

        let climbed = moves.iter().map(|(dy, _)| dy).sum::<f64>();

        let target = self.target_spacing();
        let variance = if moves.is_empty() {
            0.
        } else {
            moves
                .iter()
                .map(|(_, d)| (d - target).powi(2))
                .sum::<f64>()
                / n_moves
        };

        let avg_size = holds.iter().map(|h| h.size).sum::<f64>() / holds.len() as f64;
        let size = if self.style.crimpy_level > w.style_threshold {
            (w.size_pivot - avg_size) * w.size
        } else if self.style.hold_size_preference > w.style_threshold {
            (avg_size - w.size_pivot) * w.size
        } else {
            0.
        };

        let drops = moves.iter().filter(|(dy, _)| *dy < 0.).count() as f64;

        let dynamic = if self.style.dynamic_level > w.style_threshold {
            moves.iter().filter(|(_, d)| *d > w.long_move).count() as f64 * w.dynamic
        } else {
            0.
        };

        Some(FitnessBreakdown {
            upward: climbed * w.upward,
            spacing: -variance * w.spacing,
            size,
            length: -(holds.len() as f64 - self.target_length()).abs() * w.length,
            backtrack: -drops * w.backtrack,
            dynamic,
        })
    }

    /// Higher is better, unbounded either way
    pub fn score(&self, candidate: &Candidate) -> f64 {
        self.breakdown(candidate)
            .map_or(self.weights.short_route, |b| b.total())
    }
}

/// Score `candidate` on `board` for the given style and difficulty
pub fn fitness(
    candidate: &Candidate,
    board: &Board,
    style: &StyleParams,
    difficulty: f64,
    weights: &FitnessWeights,
) -> f64 {
    Evaluator::new(board, style, difficulty, weights).score(candidate)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_f64_approx, board::Hold, style::parse_style};

    fn column() -> Board {
        // a straight vertical line of holds 0.1 apart, sizes growing with height
        Board::new((0..10).map(|i| Hold::new(i, 0.5, i as f64 * 0.1, "generic", i as f64 * 0.1)))
            .unwrap()
    }

    fn walk(board: &Board, ids: &[u32]) -> Candidate {
        Candidate::new(ids.to_vec(), board).unwrap()
    }

    #[test]
    fn test_short_walks_are_penalized() {
        let board = column();
        let weights = FitnessWeights::default();
        for ids in [&[0][..], &[0, 1][..]] {
            for (style, difficulty) in [
                (StyleParams::default(), 0.),
                (parse_style("crimpy dyno"), 1.),
            ] {
                let candidate = walk(&board, ids);
                assert_eq!(
                    CRUX_SHORT_ROUTE_SCORE,
                    fitness(&candidate, &board, &style, difficulty, &weights)
                );
            }
        }
    }

    #[test]
    fn test_terms_default_style() {
        let board = column();
        let style = StyleParams::default();
        let weights = FitnessWeights::default();
        let eval = Evaluator::new(&board, &style, 0.5, &weights);

        // four holds straight up, 0.1 apart
        let candidate = walk(&board, &[0, 1, 2, 3]);
        let b = eval.breakdown(&candidate).unwrap();

        assert_f64_approx!(30., b.upward);
        // target spacing 0.15, every move is 0.1 long
        assert_f64_approx!(-0.0025 * 500., b.spacing);
        assert_f64_approx!(0., b.size);
        // target length 4 + 0.5 * 6 = 7
        assert_f64_approx!(-30., b.length);
        assert_f64_approx!(0., b.backtrack);
        assert_f64_approx!(0., b.dynamic);
        assert_f64_approx!(b.total(), eval.score(&candidate));
    }

    #[test]
    fn test_backtracking_is_penalized() {
        let board = column();
        let style = StyleParams::default();
        let weights = FitnessWeights::default();
        let eval = Evaluator::new(&board, &style, 0.5, &weights);

        let b = eval.breakdown(&walk(&board, &[0, 2, 1, 3])).unwrap();
        assert_f64_approx!(-20., b.backtrack);
        assert_f64_approx!(30., b.upward);
        assert!(eval.score(&walk(&board, &[0, 1, 2, 3])) > eval.score(&walk(&board, &[0, 2, 1, 3])));
    }

    #[test]
    fn test_size_terms() {
        let board = column();
        let weights = FitnessWeights::default();
        let candidate = walk(&board, &[1, 2, 3]);

        // average size 0.2
        let crimpy = parse_style("crimpy");
        let b = Evaluator::new(&board, &crimpy, 0., &weights)
            .breakdown(&candidate)
            .unwrap();
        assert_f64_approx!((0.5 - 0.2) * 50., b.size);

        let juggy = StyleParams {
            hold_size_preference: 0.9,
            ..StyleParams::default()
        };
        let b = Evaluator::new(&board, &juggy, 0., &weights)
            .breakdown(&candidate)
            .unwrap();
        assert_f64_approx!((0.2 - 0.5) * 50., b.size);

        // crimpy wins when both are set
        let both = StyleParams {
            hold_size_preference: 0.9,
            crimpy_level: 0.9,
            ..StyleParams::default()
        };
        let b = Evaluator::new(&board, &both, 0., &weights)
            .breakdown(&candidate)
            .unwrap();
        assert_f64_approx!((0.5 - 0.2) * 50., b.size);
    }

    #[test]
    fn test_dynamic_term() {
        let board = column();
        let weights = FitnessWeights::default();
        let dyno = parse_style("dyno");
        let eval = Evaluator::new(&board, &dyno, 0., &weights);

        // moves of 0.2, 0.1, 0.3: two exceed 0.15
        let b = eval.breakdown(&walk(&board, &[0, 2, 3, 6])).unwrap();
        assert_f64_approx!(20., b.dynamic);

        let calm = StyleParams::default();
        let b = Evaluator::new(&board, &calm, 0., &weights)
            .breakdown(&walk(&board, &[0, 2, 3, 6]))
            .unwrap();
        assert_f64_approx!(0., b.dynamic);
    }

    #[test]
    fn test_weights_are_configurable() {
        let board = column();
        let style = StyleParams::default();
        let candidate = walk(&board, &[0, 1]);
        let weights = FitnessWeights {
            short_route: -5.,
            upward: 0.,
            spacing: 0.,
            length: 0.,
            min_len: 2,
            ..FitnessWeights::default()
        };
        assert_f64_approx!(0., fitness(&candidate, &board, &style, 0.3, &weights));

        let weights = FitnessWeights {
            short_route: -5.,
            ..FitnessWeights::default()
        };
        assert_eq!(-5., fitness(&candidate, &board, &style, 0.3, &weights));
    }
}
