//! The finished route handed to downstream consumers.

use crate::{
    board::{Board, HoldId},
    candidate::Candidate,
    error::Result,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

/// An ordered start-to-top sequence of holds with its designated start and top holds.
///
/// A route only stores ids. Metrics are recomputed against a [Board] on every call, so editing a
/// route through [Route::add_hold], [Route::remove_hold], [Route::set_start] or [Route::set_top]
/// can never leave a stale value behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub holds: Vec<HoldId>,
    #[serde(default)]
    pub start_holds: Vec<HoldId>,
    #[serde(default)]
    pub top_hold: Option<HoldId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Rounded metrics of a [Route], for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub holds: Vec<HoldId>,
    pub start: Vec<HoldId>,
    pub top: Option<HoldId>,
    pub avg_move_dist: f64,
    pub avg_hold_size: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.).round() / 100.
}

impl Route {
    pub fn new(holds: Vec<HoldId>) -> Self {
        Self {
            holds,
            ..Self::default()
        }
    }

    /// Start holds are the first two holds of the walk (fewer for shorter walks) and the top hold
    /// is its last, whatever its height.
    pub fn from_candidate(candidate: Candidate) -> Self {
        let holds = candidate.into_inner();
        let start_holds = holds.iter().take(2).copied().collect();
        let top_hold = holds.last().copied();
        Self {
            holds,
            start_holds,
            top_hold,
            metadata: BTreeMap::new(),
        }
    }

    pub fn add_hold(&mut self, id: HoldId) {
        self.holds.push(id);
    }

    /// Remove the first occurrence of `id`, if any
    pub fn remove_hold(&mut self, id: HoldId) {
        if let Some(idx) = self.holds.iter().position(|h| *h == id) {
            self.holds.remove(idx);
        }
    }

    pub fn set_start(&mut self, ids: Vec<HoldId>) {
        self.start_holds = ids;
    }

    pub fn set_top(&mut self, id: HoldId) {
        self.top_hold = Some(id);
    }

    /// Sum of the distances between consecutive holds. Moves touching a hold that is not on
    /// `board` are skipped.
    pub fn total_move_distance(&self, board: &Board) -> f64 {
        self.holds
            .windows(2)
            .filter_map(|pair| board.distance(pair[0], pair[1]))
            .sum()
    }

    pub fn avg_move_distance(&self, board: &Board) -> f64 {
        if self.holds.len() < 2 {
            return 0.;
        }
        self.total_move_distance(board) / (self.holds.len() - 1) as f64
    }

    /// Mean size of the holds found on `board`, 0 if there are none
    pub fn avg_hold_size(&self, board: &Board) -> f64 {
        let (n, total) = self
            .holds
            .iter()
            .filter_map(|id| board.get(*id))
            .fold((0usize, 0.), |(n, acc), hold| (n + 1, acc + hold.size));
        if n == 0 {
            0.
        } else {
            total / n as f64
        }
    }

    pub fn summary(&self, board: &Board) -> RouteSummary {
        RouteSummary {
            holds: self.holds.clone(),
            start: self.start_holds.clone(),
            top: self.top_hold,
            avg_move_dist: round2(self.avg_move_distance(board)),
            avg_hold_size: round2(self.avg_hold_size(board)),
        }
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_f64_approx, board::Hold};

    fn two_hold_board() -> Board {
        Board::new([
            Hold::new(1, 0., 0., "jug", 0.2),
            Hold::new(2, 0., 1., "crimp", 0.6),
        ])
        .unwrap()
    }

    #[test]
    fn test_metrics_two_holds() {
        let board = two_hold_board();
        let route = Route::new(vec![1, 2]);
        assert_f64_approx!(1., route.total_move_distance(&board));
        assert_f64_approx!(1., route.avg_move_distance(&board));
        assert_f64_approx!(0.4, route.avg_hold_size(&board));
    }

    #[test]
    fn test_metrics_single_hold() {
        let board = two_hold_board();
        let route = Route::new(vec![1]);
        assert_eq!(0., route.total_move_distance(&board));
        assert_eq!(0., route.avg_move_distance(&board));
    }

    #[test]
    fn test_metrics_follow_edits() {
        let board = Board::grid_uniform(3, 3, 0.5);
        let mut route = Route::new(vec![0, 3]);
        assert_f64_approx!(0.5, route.total_move_distance(&board));

        route.add_hold(6);
        assert_f64_approx!(1., route.total_move_distance(&board));
        assert_f64_approx!(0.5, route.avg_move_distance(&board));

        route.remove_hold(3);
        assert_eq!(vec![0, 6], route.holds);
        assert_f64_approx!(1., route.avg_move_distance(&board));

        // absent ids are ignored
        route.remove_hold(42);
        assert_eq!(vec![0, 6], route.holds);
    }

    #[test]
    fn test_metrics_skip_unknown_holds() {
        let board = two_hold_board();
        let route = Route::new(vec![1, 2, 99]);
        assert_f64_approx!(1., route.total_move_distance(&board));
        assert_f64_approx!(0.5, route.avg_move_distance(&board));
        assert_f64_approx!(0.4, route.avg_hold_size(&board));
        assert_eq!(0., Route::default().avg_hold_size(&board));
    }

    #[test]
    fn test_from_candidate() {
        let board = Board::grid_uniform(3, 3, 0.5);
        let route = Route::from_candidate(Candidate::new(vec![1, 4, 7, 5], &board).unwrap());
        assert_eq!(vec![1, 4], route.start_holds);
        assert_eq!(Some(5), route.top_hold);

        let single = Route::from_candidate(Candidate::new(vec![2], &board).unwrap());
        assert_eq!(vec![2], single.start_holds);
        assert_eq!(Some(2), single.top_hold);
    }

    #[test]
    fn test_setters_and_summary() {
        let board = Board::grid_uniform(3, 3, 0.5);
        let mut route = Route::new(vec![0, 1, 4, 7]);
        route.set_start(vec![0]);
        route.set_top(7);
        let summary = route.summary(&board);
        assert_eq!(vec![0], summary.start);
        assert_eq!(Some(7), summary.top);
        assert_eq!(round2(route.avg_move_distance(&board)), summary.avg_move_dist);
        assert_eq!(0.5, summary.avg_hold_size);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut route = Route::new(vec![3, 1, 2]);
        route.set_top(2);
        route.metadata.insert("fitness".into(), "12.5".into());
        let parsed = Route::from_str(&route.to_string().unwrap()).unwrap();
        assert_eq!(route, parsed);

        let bare = Route::from_str(r#"{"holds":[1,2]}"#).unwrap();
        assert_eq!(None, bare.top_hold);
        assert!(bare.start_holds.is_empty());
    }

    #[test]
    fn test_file_roundtrip() {
        let mut route = Route::new(vec![0, 4, 8]);
        route.set_start(vec![0, 4]);
        route.set_top(8);
        route.metadata.insert("seed".into(), "7".into());

        let path = std::env::temp_dir().join(format!("crux-route-{}.json", std::process::id()));
        route.to_file(&path).unwrap();
        let loaded = Route::from_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(route, loaded.unwrap());

        assert!(matches!(
            Route::from_file(&path),
            Err(crate::error::CruxError::Io(_))
        ));
    }
}
