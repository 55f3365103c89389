//! Search statistics.
//!
//! Accumulated across a match session to compare strategies.

use std::time::{Duration, Instant};

use untangle_core::CpuMove;

/// Whole milliseconds since `start`, saturating.
pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Session-level statistics.
///
/// # Example
///
/// ```
/// use untangle_core::{CpuMove, Point};
/// use untangle_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_search(120, &CpuMove::relocate(0, Point::ORIGIN, Point::new(1.0, 1.0), 3, 1));
/// stats.record_search(80, &CpuMove::none(1));
///
/// assert_eq!(stats.searches, 2);
/// assert_eq!(stats.candidates_evaluated, 200);
/// assert_eq!(stats.moves_applied, 1);
/// assert_eq!(stats.intersections_removed, 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Calls to `find_best_move`.
    pub searches: u64,
    /// Candidates evaluated across all searches.
    pub candidates_evaluated: u64,
    /// Valid moves returned (and applied by the session).
    pub moves_applied: u64,
    /// Valid moves with zero reduction.
    pub neutral_moves: u64,
    /// Sum of positive reductions.
    pub intersections_removed: u64,
    /// Sum of reported search times.
    pub search_time_ms: u64,
}

impl SearchStats {
    /// Marks the start of the session.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Wall-clock time since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Records one completed search and its result.
    pub fn record_search(&mut self, candidates: usize, mv: &CpuMove) {
        self.searches += 1;
        self.candidates_evaluated += candidates as u64;
        self.search_time_ms += mv.computation_time_ms;

        if mv.is_valid() {
            self.moves_applied += 1;
            if mv.intersection_reduction > 0 {
                self.intersections_removed += mv.intersection_reduction as u64;
            } else {
                self.neutral_moves += 1;
            }
        }
    }

    /// Candidates evaluated per second of search time.
    pub fn candidates_per_second(&self) -> f64 {
        if self.search_time_ms == 0 {
            0.0
        } else {
            self.candidates_evaluated as f64 * 1000.0 / self.search_time_ms as f64
        }
    }

    /// Average candidates per search.
    pub fn candidates_per_search(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.candidates_evaluated as f64 / self.searches as f64
        }
    }
}
