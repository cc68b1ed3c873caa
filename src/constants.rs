//! Centralized defaults for crux route generation.
//!
//! All tunable parameters are defined here with the `CRUX_` prefix. Runtime values come from
//! [crate::config::EvolutionConfig] and [crate::fitness::FitnessWeights], whose `Default`s read
//! these.

// ============================================================================
// Evolution Parameters
// ============================================================================

/// Number of candidate routes alive in every generation
pub const CRUX_POPULATION_SIZE: usize = 50;

/// Number of generations to run, there is no early stopping
pub const CRUX_GENERATIONS: usize = 100;

/// Probability that a freshly bred child is mutated
pub const CRUX_MUTATION_RATE: f64 = 0.2;

/// Number of best individuals carried unchanged into the next generation
pub const CRUX_ELITE_SIZE: usize = 5;

/// Number of contestants drawn for a tournament
pub const CRUX_TOURNAMENT_SIZE: usize = 5;

/// Relative weight of each mutation kind (replace, insert, remove, swap)
pub const CRUX_MUTATION_WEIGHTS: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

/// Seeded routes aim for `base + difficulty * per_difficulty` extra holds
pub const CRUX_SEED_LENGTH_BASE: f64 = 4.0;
pub const CRUX_SEED_LENGTH_PER_DIFFICULTY: f64 = 30.0;

// ============================================================================
// Route Geometry
// ============================================================================

/// Start holds must sit strictly below this height
pub const CRUX_START_BAND: f64 = 0.2;

/// How far below the current hold the next hold may sit
pub const CRUX_MAX_DROP: f64 = 0.05;

/// Exclusive bounds on the length of a constructed move
pub const CRUX_MIN_STEP: f64 = 0.05;
pub const CRUX_MAX_STEP: f64 = 0.3;

/// Half-width of the box around a midpoint that an inserted hold must fall in
pub const CRUX_INSERT_WINDOW: f64 = 0.15;

/// Extra holds a mutation may insert beyond the seeding length
pub const CRUX_INSERT_SLACK: usize = 3;

// ============================================================================
// Fitness Weights
// ============================================================================

/// Score of any route shorter than [CRUX_MIN_SCORED_LEN]
pub const CRUX_SHORT_ROUTE_SCORE: f64 = -1000.0;
pub const CRUX_MIN_SCORED_LEN: usize = 3;

/// Reward per unit of height gained
pub const CRUX_UPWARD_WEIGHT: f64 = 100.0;

/// Penalty per unit of move-distance variance around the target
pub const CRUX_SPACING_WEIGHT: f64 = 500.0;

/// Target move distance is `base + avg_move_distance * per_style`
pub const CRUX_SPACING_BASE: f64 = 0.1;
pub const CRUX_SPACING_PER_STYLE: f64 = 0.1;

/// Reward for average hold size moving the preferred way from [CRUX_SIZE_PIVOT]
pub const CRUX_SIZE_WEIGHT: f64 = 50.0;
pub const CRUX_SIZE_PIVOT: f64 = 0.5;

/// Penalty per hold of deviation from the target length
pub const CRUX_LENGTH_WEIGHT: f64 = 10.0;

/// Target length is `base + difficulty * per_difficulty`
pub const CRUX_LENGTH_BASE: f64 = 4.0;
pub const CRUX_LENGTH_PER_DIFFICULTY: f64 = 6.0;

/// Penalty per downward move
pub const CRUX_BACKTRACK_WEIGHT: f64 = 20.0;

/// Reward per long move on dynamic routes
pub const CRUX_DYNAMIC_WEIGHT: f64 = 10.0;

/// Moves longer than this count as dynamic
pub const CRUX_LONG_MOVE: f64 = 0.15;

/// Style levels above this switch on their fitness term
pub const CRUX_STYLE_THRESHOLD: f64 = 0.7;

// ============================================================================
// Synthetic Board
// ============================================================================

/// Dimensions of the grid board the demo binary generates
pub const CRUX_BOARD_ROWS: usize = 10;
pub const CRUX_BOARD_COLS: usize = 10;
