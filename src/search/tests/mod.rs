//! Search tests.
//!
//! - `reference.rs` - Alpha-beta against brute-force minimax
//! - `behavior.rs` - Mates, captures, caches and early exits
//! - `proptest.rs` - Property-based tests over random playouts


use super::SearchParams;
use crate::position::Game;

fn game(fen: &str) -> Game {
    Game::from_fen(fen).expect("valid fen")
}

/// Default parameters with small caches
fn small_params() -> SearchParams {
    SearchParams {
        tt_mb: 1,
        eval_cache_mb: 1,
        lookahead_mb: 1,
        ..SearchParams::default()
    }
}
