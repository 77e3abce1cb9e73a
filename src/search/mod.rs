//! Move search.
//!
//! This module implements:
//! - Iterative deepening under a time manager
//! - Fail-hard negamax alpha-beta with fractional depth (captures extended)
//! - Quiescence search over captures and check evasions
//! - Transposition, static-evaluation and lookahead caches
//! - A pluggable early-exit policy (see [`pruning`])
//!
//! The searcher owns its caches. They are cleared at the start of every
//! decision and never shared between unrelated positions.

pub mod constants;
mod iterative;
pub mod move_order;
mod negamax;
pub mod params;
pub mod pruning;
mod quiescence;

#[cfg(test)]
mod tests;

use cozy_chess::{Color, Move};

pub use constants::{INFINITY, PLY};
pub use move_order::MoveOrderer;
pub use params::{OrderingParams, SearchParams};
pub use pruning::{DecisiveMargin, NoPruning, NodeSnapshot, PruningPolicy};

use crate::eval::Evaluator;
use crate::position::Position;
use crate::time::TimeManager;
use crate::tt::ScoreTable;

/// Outcome of a completed search round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score from the side to move's perspective
    pub score: i32,
    /// Depth of the round that produced the result, in plies
    pub depth: u32,
    pub stats: SearchStats,
}

/// Search statistics, reset at the start of every decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub cache_hits: u64,
    pub cutoffs: u64,
    /// Nodes settled by the pruning policy
    pub early_exits: u64,
    /// Deepest completed round
    pub depth: u32,
}

/// The three caches consulted during search.
#[derive(Clone, Debug)]
pub struct SearchTables {
    pub transpositions: ScoreTable,
    pub static_evals: ScoreTable,
    pub lookahead: ScoreTable,
}

impl SearchTables {
    #[must_use]
    pub fn new(params: &SearchParams) -> Self {
        SearchTables {
            transpositions: ScoreTable::new(params.tt_mb),
            static_evals: ScoreTable::new(params.eval_cache_mb),
            lookahead: ScoreTable::new(params.lookahead_mb),
        }
    }

    pub fn clear(&mut self) {
        self.transpositions.clear();
        self.static_evals.clear();
        self.lookahead.clear();
    }
}

/// What the current search measures itself against.
#[derive(Clone, Copy, Debug)]
struct Root {
    side: Color,
    eval: i32,
}

/// Single-threaded move searcher.
pub struct Searcher<R = DecisiveMargin> {
    params: SearchParams,
    evaluator: Evaluator,
    orderer: MoveOrderer,
    time: TimeManager,
    policy: R,
    tables: SearchTables,
    stats: SearchStats,
    root: Root,
}

impl Searcher {
    /// Searcher with the default early-exit policy.
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        Self::with_policy(params, DecisiveMargin::default())
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl<R: PruningPolicy> Searcher<R> {
    #[must_use]
    pub fn with_policy(params: SearchParams, policy: R) -> Self {
        Searcher {
            evaluator: Evaluator::new(params.eval.clone()),
            orderer: MoveOrderer::new(params.ordering.clone()),
            time: TimeManager::new(params.time.clone()),
            tables: SearchTables::new(&params),
            policy,
            stats: SearchStats::default(),
            root: Root {
                side: Color::White,
                eval: 0,
            },
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    #[must_use]
    pub fn policy(&self) -> &R {
        &self.policy
    }

    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[must_use]
    pub fn tables(&self) -> &SearchTables {
        &self.tables
    }

    /// Forget everything cached and reset statistics.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.stats = SearchStats::default();
    }

    /// Search `position` to `depth` plies inside `(alpha, beta)`.
    ///
    /// Returns the fail-hard score from the side to move's perspective and
    /// the move that raised alpha, if any. Caches are kept from earlier calls;
    /// call [`clear`](Self::clear) to start fresh. The position is restored
    /// before returning.
    pub fn search<P: Position>(
        &mut self,
        position: &mut P,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> (i32, Option<Move>) {
        self.set_root(position);
        let node = negamax::Node {
            depth: depth as i32 * PLY,
            alpha,
            beta,
            ply: 0,
            capture: false,
        };
        self.alpha_beta(position, node)
    }

    fn set_root<P: Position>(&mut self, position: &P) {
        self.evaluator.set_root(position);
        self.root = Root {
            side: position.side_to_move(),
            eval: self.static_eval(position),
        };
    }

    /// Heuristic evaluation for the side to move, cached by position.
    fn static_eval<P: Position>(&mut self, position: &P) -> i32 {
        let hash = position.hash();
        if let Some(score) = self.tables.static_evals.probe(hash) {
            return score;
        }
        let score = self
            .evaluator
            .heuristic(position, position.side_to_move());
        self.tables.static_evals.store(hash, score, 0);
        score
    }

    /// Sort `moves` with the lookahead cache when enabled.
    fn order_moves<P: Position>(&self, position: &mut P, moves: &mut Vec<Move>) {
        let lookahead = self
            .params
            .lookahead_ordering
            .then_some(&self.tables.lookahead);
        self.orderer.order(position, moves, lookahead);
    }
}
