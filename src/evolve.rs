//! The generational loop: seed a population of random walks, then repeatedly score it, keep the
//! elites and breed the rest through tournament selection, crossover and mutation.
//!
//! The whole run draws from one [WyRng] stream, so a fixed [EvolutionConfig::seed] reproduces
//! the run exactly. Scoring is the only step that may run in parallel (feature `parallel`) and it
//! draws no randomness.

use crate::{
    board::Board,
    candidate::Candidate,
    config::EvolutionConfig,
    constants::{
        CRUX_MIN_SCORED_LEN, CRUX_SEED_LENGTH_BASE, CRUX_SEED_LENGTH_PER_DIFFICULTY,
        CRUX_START_BAND,
    },
    construct::{build_random_route, start_holds},
    crossover::crossover,
    error::{CruxError, Result},
    fitness::Evaluator,
    mutate::mutate,
    random::{entropy_seed, EvolutionEvent, Happens, ProbBinding, ProbStatic, WyRng},
    route::Route,
    select::{rank, tournament},
    style::StyleParams,
};
use log::{debug, info, warn};
use serde::Serialize;

/// Hold count a seeded walk aims for. Mutation may insert up to a few holds beyond it.
pub fn seed_length(difficulty: f64) -> usize {
    (CRUX_SEED_LENGTH_BASE + difficulty * CRUX_SEED_LENGTH_PER_DIFFICULTY) as usize
}

/// Scores of one generation, before breeding
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    /// best score of this or any earlier generation
    pub best_ever: f64,
}

/// Outcome of a run: the best walk ever scored and how the population got there
#[derive(Debug, Clone)]
pub struct Evolution {
    pub best: Candidate,
    pub best_fitness: f64,
    pub history: Vec<GenerationStats>,
    /// the seed the run drew from, whether configured or fresh
    pub seed: u64,
}

impl Evolution {
    /// The best walk as a [Route], tagged with its score, the generation count and the seed
    pub fn into_route(self) -> Route {
        let mut route = Route::from_candidate(self.best);
        route
            .metadata
            .insert("fitness".into(), format!("{:.4}", self.best_fitness));
        route
            .metadata
            .insert("generations".into(), self.history.len().to_string());
        route.metadata.insert("seed".into(), self.seed.to_string());
        route
    }
}

pub struct RouteOptimizer<'a> {
    board: &'a Board,
    style: &'a StyleParams,
    difficulty: f64,
    config: &'a EvolutionConfig,
    target_length: usize,
}

impl<'a> RouteOptimizer<'a> {
    /// Fails on an invalid config, a difficulty outside `[0, 1]`, an empty board or a board with
    /// nothing to start from
    pub fn new(
        board: &'a Board,
        style: &'a StyleParams,
        difficulty: f64,
        config: &'a EvolutionConfig,
    ) -> Result<Self> {
        config.validate()?;
        if !(0. ..=1.).contains(&difficulty) {
            return Err(CruxError::Config(format!(
                "difficulty ({difficulty}) must lie in [0, 1]"
            )));
        }
        if board.is_empty() {
            return Err(CruxError::EmptyBoard);
        }
        if start_holds(board).is_empty() {
            return Err(CruxError::NoStartHolds {
                band: CRUX_START_BAND,
            });
        }

        Ok(Self {
            board,
            style,
            difficulty,
            config,
            target_length: seed_length(difficulty),
        })
    }

    fn evaluator(&self) -> Evaluator<'a> {
        Evaluator::new(self.board, self.style, self.difficulty, &self.config.weights)
    }

    pub fn run(&self) -> Result<Evolution> {
        let seed = self.config.seed.unwrap_or_else(entropy_seed);
        let mut rng = ProbBinding::new(
            ProbStatic::new(self.config.mutation_rate, self.config.mutation_weights),
            WyRng::seeded(seed),
        );
        info!(
            "evolving {} routes over {} generations (difficulty {:.2}, seed {seed})",
            self.config.population_size, self.config.generations, self.difficulty
        );

        let mut population = self.seed_population(&mut rng)?;
        let mut best = population[0].clone();
        let mut best_fitness = f64::NEG_INFINITY;
        let mut history = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            let mut scored = self.evaluate(population);
            rank(&mut scored);

            let (top, top_fitness) = &scored[0];
            if *top_fitness > best_fitness {
                debug!(
                    "generation {generation}: new best {top_fitness:.3} over {} holds",
                    top.len()
                );
                best = top.clone();
                best_fitness = *top_fitness;
            }

            let stats = GenerationStats {
                generation,
                best: *top_fitness,
                mean: scored.iter().map(|(_, f)| f).sum::<f64>() / scored.len() as f64,
                best_ever: best_fitness,
            };
            info!(
                "generation {}/{}: best {:.3} mean {:.3} best-ever {:.3}",
                generation + 1,
                self.config.generations,
                stats.best,
                stats.mean,
                stats.best_ever
            );
            history.push(stats);

            if generation + 1 == self.config.generations {
                break;
            }
            population = self.breed(&scored, &mut rng);
        }

        info!("evolution complete, best fitness {best_fitness:.3}");
        Ok(Evolution {
            best,
            best_fitness,
            history,
            seed,
        })
    }

    fn seed_population(&self, rng: &mut impl Happens) -> Result<Vec<Candidate>> {
        let population = (0..self.config.population_size)
            .map(|_| build_random_route(self.board, self.target_length, rng))
            .collect::<Option<Vec<_>>>()
            .ok_or(CruxError::NoStartHolds {
                band: CRUX_START_BAND,
            })?;

        let short = population
            .iter()
            .filter(|c| c.len() < CRUX_MIN_SCORED_LEN)
            .count();
        if short > 0 {
            warn!(
                "{short} of {} seeded routes have fewer than {CRUX_MIN_SCORED_LEN} holds",
                population.len()
            );
        }
        debug!(
            "seeded {} routes aiming for {} extra holds, mean length {:.1}",
            population.len(),
            self.target_length,
            population.iter().map(Candidate::len).sum::<usize>() as f64 / population.len() as f64
        );
        Ok(population)
    }

    /// Score every member, keeping population order
    fn evaluate(&self, population: Vec<Candidate>) -> Vec<(Candidate, f64)> {
        let eval = self.evaluator();
        let score = |c: Candidate| {
            let f = eval.score(&c);
            (c, f)
        };

        #[cfg(feature = "parallel")]
        let scored: Vec<_> = {
            use rayon::prelude::*;
            population.into_par_iter().map(score).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let scored: Vec<_> = population.into_iter().map(score).collect();

        scored
    }

    /// `scored` must be ranked best-first
    fn breed(&self, scored: &[(Candidate, f64)], rng: &mut impl Happens) -> Vec<Candidate> {
        let size = self.config.tournament_size;
        let mut next = scored
            .iter()
            .take(self.config.elite_size)
            .map(|(c, _)| c.clone())
            .collect::<Vec<_>>();

        while next.len() < self.config.population_size {
            let (Some(l), Some(r)) = (tournament(scored, size, rng), tournament(scored, size, rng))
            else {
                break;
            };

            let mut child = crossover(l, r, rng);
            if rng.happens(EvolutionEvent::Mutate) {
                child = mutate(&child, self.board, self.target_length, rng);
            }
            next.push(child);
        }

        next
    }
}

/// Evolve a route on `board` with the default configuration
pub fn generate_route(board: &Board, difficulty: f64, style: &StyleParams) -> Result<Route> {
    generate_route_with(board, difficulty, style, &EvolutionConfig::default())
}

pub fn generate_route_with(
    board: &Board,
    difficulty: f64,
    style: &StyleParams,
    config: &EvolutionConfig,
) -> Result<Route> {
    let evolution = RouteOptimizer::new(board, style, difficulty, config)?.run()?;
    Ok(evolution.into_route())
}
