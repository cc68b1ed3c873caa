mod macros;

pub mod board;
pub mod candidate;
pub mod config;
pub mod constants;
pub mod construct;
pub mod crossover;
pub mod difficulty;
pub mod error;
pub mod evolve;
pub mod fitness;
pub mod mutate;
pub mod random;
pub mod route;
pub mod select;
pub mod style;

pub use board::{Board, Hold, HoldId};
pub use candidate::Candidate;
pub use config::{Config, EvolutionConfig};
pub use difficulty::parse_difficulty;
pub use error::{CruxError, Result};
pub use evolve::{generate_route, generate_route_with, Evolution, RouteOptimizer};
pub use fitness::{fitness, FitnessWeights};
pub use random::{Happens, Probabilities};
pub use route::{Route, RouteSummary};
pub use style::{parse_style, StyleParams};
