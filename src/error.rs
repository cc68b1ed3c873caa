//! Error taxonomy for route generation.
//!
//! Only configuration problems surface as errors. Degenerate search steps (no qualifying hold to
//! extend, replace or insert) are handled in place by the operators and never reach the caller.

use crate::board::HoldId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CruxError {
    #[error("board has no holds")]
    EmptyBoard,
    #[error("no holds available in start band (y < {band})")]
    NoStartHolds { band: f64 },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("hold {0} is not on the board")]
    UnknownHold(HoldId),
    #[error("hold {0} appears more than once")]
    DuplicateHold(HoldId),
    #[error("a route needs at least one hold")]
    EmptyCandidate,
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed toml: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = core::result::Result<T, CruxError>;
