//! The hold layout a route is set on.
//!
//! Coordinates are normalized to `[0, 1]` with `y` increasing toward the top of the climb. A
//! [Board] always iterates its holds in ascending id order, so anything drawing random choices
//! from candidate lists is reproducible under a fixed seed.

use crate::error::{CruxError, Result};
use core::ops::Index;
use fxhash::FxHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

pub type HoldId = u32;

/// Size range of the holds on a synthetic grid board
const GRID_SIZE_MIN: f64 = 0.2;
const GRID_SIZE_MAX: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub id: HoldId,
    pub x: f64,
    pub y: f64,
    /// crimp, sloper, jug, ... informational only
    pub hold_type: String,
    /// 0 is the smallest, hardest to use; 1 the largest
    pub size: f64,
}

impl Hold {
    pub fn new(id: HoldId, x: f64, y: f64, hold_type: impl Into<String>, size: f64) -> Self {
        Self {
            id,
            x,
            y,
            hold_type: hold_type.into(),
            size,
        }
    }

    #[inline]
    pub fn distance(&self, other: &Hold) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A read-only set of holds, looked up by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Hold>", into = "Vec<Hold>")]
pub struct Board {
    holds: Vec<Hold>,
    index: FxHashMap<HoldId, usize>,
}

impl Board {
    /// Collect holds into a board. Fails if two holds share an id.
    pub fn new(holds: impl IntoIterator<Item = Hold>) -> Result<Self> {
        let mut holds = holds.into_iter().collect::<Vec<_>>();
        holds.sort_by_key(|h| h.id);
        if let Some(pair) = holds.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(CruxError::DuplicateHold(pair[0].id));
        }

        Ok(Self::indexed(holds))
    }

    /// `holds` must already be sorted by id and free of duplicates
    fn indexed(holds: Vec<Hold>) -> Self {
        let index = holds
            .iter()
            .enumerate()
            .map(|(idx, hold)| (hold.id, idx))
            .collect();
        Self { holds, index }
    }

    /// A `rows` x `cols` grid with ids assigned row-major from the bottom-left, `x = c/(cols-1)`,
    /// `y = r/(rows-1)` and sizes drawn uniformly from `[0.2, 0.8)`.
    pub fn grid(rows: usize, cols: usize, rng: &mut impl Rng) -> Self {
        Self::grid_with(rows, cols, |_| rng.random_range(GRID_SIZE_MIN..GRID_SIZE_MAX))
    }

    /// A grid board where every hold has the same size
    pub fn grid_uniform(rows: usize, cols: usize, size: f64) -> Self {
        Self::grid_with(rows, cols, |_| size)
    }

    fn grid_with(rows: usize, cols: usize, mut size: impl FnMut(HoldId) -> f64) -> Self {
        let norm = |i: usize, n: usize| if n > 1 { i as f64 / (n - 1) as f64 } else { 0. };
        let holds = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .enumerate()
            .map(|(id, (r, c))| {
                let id = id as HoldId;
                Hold::new(id, norm(c, cols), norm(r, rows), "generic", size(id))
            });
        Self::indexed(holds.collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    #[inline]
    pub fn get(&self, id: HoldId) -> Option<&Hold> {
        self.index.get(&id).map(|idx| &self.holds[*idx])
    }

    #[inline]
    pub fn contains(&self, id: HoldId) -> bool {
        self.index.contains_key(&id)
    }

    /// Holds in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Hold> {
        self.holds.iter()
    }

    /// Distance between two holds, if both are on the board
    pub fn distance(&self, l: HoldId, r: HoldId) -> Option<f64> {
        Some(self.get(l)?.distance(self.get(r)?))
    }

    /// Ids of every hold strictly below `band`
    pub fn below(&self, band: f64) -> Vec<HoldId> {
        self.holds
            .iter()
            .filter(|hold| hold.y < band)
            .map(|hold| hold.id)
            .collect()
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}

impl Index<HoldId> for Board {
    type Output = Hold;

    /// Panics if `id` is not on the board
    fn index(&self, id: HoldId) -> &Hold {
        self.get(id)
            .unwrap_or_else(|| panic!("hold {id} is not on the board"))
    }
}

impl TryFrom<Vec<Hold>> for Board {
    type Error = CruxError;

    fn try_from(holds: Vec<Hold>) -> Result<Self> {
        Self::new(holds)
    }
}

impl From<Board> for Vec<Hold> {
    fn from(board: Board) -> Self {
        board.holds
    }
}
