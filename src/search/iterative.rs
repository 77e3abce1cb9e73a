use cozy_chess::Move;

use super::constants::INFINITY;
use super::pruning::PruningPolicy;
use super::{SearchResult, SearchStats, Searcher};
use crate::error::SearchError;
use crate::position::Position;
use crate::time::Clock;

impl<R: PruningPolicy> Searcher<R> {
    /// Pick a move for the side to move within the clock's budget.
    ///
    /// Rounds of increasing depth run while the time manager expects the next
    /// one to fit. Depth 1 is always searched and kept. A deeper round that
    /// finishes past the budget is discarded.
    ///
    /// # Errors
    /// [`SearchError::NoLegalMoves`] if the side to move has no legal move.
    pub fn choose_move<P: Position, C: Clock>(
        &mut self,
        position: &mut P,
        clock: &C,
    ) -> Result<SearchResult, SearchError> {
        let fallback = self.begin_decision(position)?;
        let budget = self.time.budget(clock);
        let ceiling = self.time.depth_ceiling(clock.remaining());

        let mut completed = self.search_root(position, 1, fallback);
        let mut last_round = clock.elapsed();

        while completed.depth < ceiling
            && self
                .time
                .should_start_round(last_round, clock.elapsed(), budget)
        {
            let started = clock.elapsed();
            let round = self.search_root(position, completed.depth + 1, fallback);
            let finished = clock.elapsed();

            if self.time.overran(finished, budget) {
                #[cfg(feature = "logging")]
                log::debug!(
                    "discarding depth {} round: {:?} spent of {:?}",
                    round.depth,
                    finished,
                    budget
                );
                break;
            }

            last_round = finished.saturating_sub(started);
            completed = round;
        }

        self.stats.depth = completed.depth;
        completed.stats = self.stats;
        Ok(completed)
    }

    /// Iterative deepening to `depth` plies (at least 1), ignoring time.
    ///
    /// # Errors
    /// [`SearchError::NoLegalMoves`] if the side to move has no legal move.
    pub fn search_to_depth<P: Position>(
        &mut self,
        position: &mut P,
        depth: u32,
    ) -> Result<SearchResult, SearchError> {
        let fallback = self.begin_decision(position)?;

        let mut completed = self.search_root(position, 1, fallback);
        for depth in 2..=depth {
            completed = self.search_root(position, depth, fallback);
        }
        Ok(completed)
    }

    /// Reset caches and statistics; returns the first legal move.
    fn begin_decision<P: Position>(&mut self, position: &P) -> Result<Move, SearchError> {
        let mut moves = Vec::new();
        position.legal_moves(&mut moves);
        let fallback = moves.first().copied().ok_or(SearchError::NoLegalMoves)?;

        self.tables.clear();
        self.stats = SearchStats::default();
        Ok(fallback)
    }

    /// One full-window root search.
    fn search_root<P: Position>(
        &mut self,
        position: &mut P,
        depth: u32,
        fallback: Move,
    ) -> SearchResult {
        let (score, best_move) = self.search(position, depth, -INFINITY, INFINITY);
        self.stats.depth = depth;

        #[cfg(feature = "logging")]
        log::debug!(
            "depth {} score {} best {} nodes {} qnodes {} hits {}",
            depth,
            score,
            best_move.unwrap_or(fallback),
            self.stats.nodes,
            self.stats.qnodes,
            self.stats.cache_hits
        );

        SearchResult {
            best_move: best_move.unwrap_or(fallback),
            score,
            depth,
            stats: self.stats,
        }
    }
}
