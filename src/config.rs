//! Run configuration, loaded from TOML. Every field is optional and falls back to the matching
//! `CRUX_` constant.

use crate::{
    board::{Board, HoldId},
    constants::*,
    error::{CruxError, Result},
    fitness::FitnessWeights,
    random::{entropy_seed, WyRng},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Everything the evolution driver needs besides the board, style and difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// probability that a bred child is mutated
    pub mutation_rate: f64,
    pub elite_size: usize,
    pub tournament_size: usize,
    /// fixes the whole run when set
    pub seed: Option<u64>,
    /// relative weights of replace, insert, remove, swap
    pub mutation_weights: [f64; 4],
    pub weights: FitnessWeights,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: CRUX_POPULATION_SIZE,
            generations: CRUX_GENERATIONS,
            mutation_rate: CRUX_MUTATION_RATE,
            elite_size: CRUX_ELITE_SIZE,
            tournament_size: CRUX_TOURNAMENT_SIZE,
            seed: None,
            mutation_weights: CRUX_MUTATION_WEIGHTS,
            weights: FitnessWeights::default(),
        }
    }
}

impl EvolutionConfig {
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(CruxError::Config(msg));

        if self.population_size == 0 {
            return fail("population_size must be at least 1".into());
        }
        if self.elite_size > self.population_size {
            return fail(format!(
                "elite_size ({}) exceeds population_size ({})",
                self.elite_size, self.population_size
            ));
        }
        if self.tournament_size == 0 {
            return fail("tournament_size must be at least 1".into());
        }
        if !(0. ..=1.).contains(&self.mutation_rate) {
            return fail(format!(
                "mutation_rate ({}) must lie in [0, 1]",
                self.mutation_rate
            ));
        }
        if self.generations == 0 {
            return fail("generations must be at least 1".into());
        }
        Ok(())
    }
}

/// The synthetic grid board the binary climbs on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    /// seed for hold sizes, drawn fresh when unset
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: CRUX_BOARD_ROWS,
            cols: CRUX_BOARD_COLS,
            seed: None,
        }
    }
}

impl BoardConfig {
    pub fn build(&self) -> Board {
        let mut rng = WyRng::seeded(self.seed.unwrap_or_else(entropy_seed));
        Board::grid(self.rows, self.cols, &mut rng)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evolution: EvolutionConfig,
    pub board: BoardConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board.rows == 0 || self.board.cols == 0 {
            return Err(CruxError::Config(format!(
                "board must have at least one row and column, got {}x{}",
                self.board.rows, self.board.cols
            )));
        }
        // grid ids run 0..rows * cols and must fit a HoldId
        let holds = self.board.rows.checked_mul(self.board.cols);
        if holds.map_or(true, |n| n - 1 > HoldId::MAX as usize) {
            return Err(CruxError::Config(format!(
                "a {}x{} board has more holds than hold ids",
                self.board.rows, self.board.cols
            )));
        }
        self.evolution.validate()
    }
}
