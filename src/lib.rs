//! Move selection for chess.
//!
//! A single-threaded negamax alpha-beta searcher with quiescence search,
//! score caches and iterative deepening under a time budget. Rules (move
//! generation, make/undo, terminal detection) come from any [`Position`];
//! [`Game`] provides one on top of `cozy-chess`.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use chess_search::{Game, GameClock, Searcher, SearchParams};
//!
//! let mut game = Game::from_fen("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
//! let mut searcher = Searcher::new(SearchParams::default());
//!
//! let result = searcher.search_to_depth(&mut game, 3).unwrap();
//! assert_eq!(result.best_move.to_string(), "h1h8");
//!
//! // Under a clock, depth 1 is always searched
//! let clock = GameClock::start(Duration::from_millis(50));
//! let result = searcher.choose_move(&mut game, &clock).unwrap();
//! assert_eq!(result.depth, 1);
//! ```

pub mod error;
pub mod eval;
pub mod position;
pub mod search;
pub mod time;
pub mod tt;

pub use cozy_chess;

pub use error::{PositionError, SearchError};
pub use eval::{EvalParams, Evaluator, MATE_SCORE};
pub use position::{encode_move, Game, MoveScope, Position};
pub use search::{
    DecisiveMargin, NoPruning, OrderingParams, PruningPolicy, SearchParams, SearchResult,
    SearchStats, Searcher,
};
pub use time::{Clock, GameClock, TimeManager, TimeParams};
pub use tt::{KeyPolicy, ScoreTable};
