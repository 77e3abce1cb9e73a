//! Search tests to verify the engine finds correct moves in various positions.

use std::time::{Duration, Instant};

use chess_search::cozy_chess::{Color, Move};
use chess_search::eval::mate_score;
use chess_search::{
    DecisiveMargin, Evaluator, Game, GameClock, NoPruning, Position, SearchError, SearchParams,
    Searcher,
};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).expect("valid fen")
}

fn legal_moves(game: &Game) -> Vec<Move> {
    let mut moves = Vec::new();
    game.legal_moves(&mut moves);
    moves
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Qe8# is mate
    let mut board = game("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let mut searcher = Searcher::default();

    let result = searcher.search_to_depth(&mut board, 3).unwrap();
    assert_eq!(result.best_move.to_string(), "e1e8", "Should find Qe8# (back rank mate)");
    assert_eq!(result.score, mate_score(1));
}

/// Test that the engine finds a simple mate in 1 with queen
#[test]
fn finds_mate_in_one_queen() {
    // White to move, Qxf7# is mate
    let mut board =
        game("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4");
    let mut searcher = Searcher::default();

    let result = searcher.search_to_depth(&mut board, 2).unwrap();
    assert_eq!(result.best_move.to_string(), "h5f7", "Should find Qxf7# (scholar's mate)");
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    // White to move, should not hang the queen
    let mut board = game("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3");
    let mut searcher = Searcher::default();

    let result = searcher.search_to_depth(&mut board, 3).unwrap();
    // Should not move queen to c6 where it can be taken by pawn
    assert_ne!(result.best_move.to_string(), "f3c6", "Should not hang the queen on c6");
}

/// Test that the engine captures free material
#[test]
fn captures_hanging_queen() {
    let mut board = game("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let mut searcher = Searcher::default();

    let result = searcher.search_to_depth(&mut board, 3).unwrap();
    assert_eq!(result.best_move.to_string(), "d2d5");
}

/// Test iterative deepening produces legal moves at every depth
#[test]
fn iterative_deepening_consistency() {
    let mut board = Game::new();
    let mut searcher = Searcher::default();

    let best2 = searcher.search_to_depth(&mut board, 2).unwrap();
    let best3 = searcher.search_to_depth(&mut board, 3).unwrap();

    let moves = legal_moves(&board);
    assert!(moves.contains(&best2.best_move), "Depth 2 move should be legal");
    assert!(moves.contains(&best3.best_move), "Depth 3 move should be legal");
    assert_eq!(best3.depth, 3);
}

/// Test that search handles single legal move positions
#[test]
fn single_legal_move() {
    // White king on h1 can only escape to h2
    let mut board = game("8/8/8/8/8/5k2/8/5q1K w - - 0 1");
    assert_eq!(legal_moves(&board).len(), 1);

    let mut searcher = Searcher::default();
    let result = searcher.search_to_depth(&mut board, 3).unwrap();
    assert_eq!(result.best_move.to_string(), "h1h2", "Only legal move should be Kh2");
}

/// Test that search reports an error for a checkmated root
#[test]
fn no_move_in_checkmate() {
    // White is checkmated
    let mut board = game("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(board.is_checkmate(), "Position should be checkmate");

    let mut searcher = Searcher::default();
    let clock = GameClock::start(Duration::from_secs(10));
    assert_eq!(
        searcher.choose_move(&mut board, &clock).unwrap_err(),
        SearchError::NoLegalMoves
    );
}

/// Test draw detection by repetition
#[test]
fn handles_draw_by_repetition() {
    let mut board = Game::new();
    for notation in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        board.play_uci(notation).unwrap();
    }
    assert!(board.is_draw(), "Should be a draw by repetition");
}

/// Test that stalemate is a draw and not a mate
#[test]
fn identifies_stalemate() {
    let board = game("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    assert!(board.is_draw(), "Position should be stalemate");
    assert!(!board.is_checkmate(), "Position should not be checkmate");
}

/// Test fifty move rule detection
#[test]
fn fifty_move_rule() {
    let board = game("8/8/8/8/8/8/8/K1k5 w - - 100 60");
    assert!(board.is_draw(), "Position with 100 halfmove clock should be a draw");
}

/// Test that positions with material advantage evaluate correctly
#[test]
fn evaluation_material_advantage() {
    let eval = Evaluator::default();

    // White up a queen
    let white_up = game("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let score = eval.evaluate(&white_up, Color::White);
    assert!(score > 800, "White up a queen should be very positive (eval: {score})");

    // Black up a queen
    let black_up = game("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
    let score = eval.evaluate(&black_up, Color::White);
    assert!(score < -800, "Black up a queen should be very negative (eval: {score})");
}

/// Test that a timed search returns a legal move within its budget
#[test]
fn timed_search_stays_within_budget() {
    let mut board = game("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let mut searcher = Searcher::default();
    let clock = GameClock::start(Duration::from_secs(3));

    let start = Instant::now();
    let result = searcher.choose_move(&mut board, &clock).unwrap();
    let elapsed = start.elapsed();

    assert!(legal_moves(&board).contains(&result.best_move));
    assert!(result.depth >= 1);
    assert!(elapsed < Duration::from_secs(30), "Search took too long: {elapsed:?}");
}

/// Test that both pruning policies agree on a clear tactic
#[test]
fn pruning_policies_agree_on_tactics() {
    let fen = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";

    let mut plain = Searcher::with_policy(SearchParams::default(), NoPruning);
    let mut pruned = Searcher::with_policy(SearchParams::default(), DecisiveMargin::default());

    let a = plain.search_to_depth(&mut game(fen), 3).unwrap();
    let b = pruned.search_to_depth(&mut game(fen), 3).unwrap();
    assert_eq!(a.best_move, b.best_move);
}

/// Test that the search leaves the game as it found it
#[test]
fn search_restores_game() {
    let mut board = game("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let hash = board.hash();
    let ply = board.ply();

    let mut searcher = Searcher::default();
    searcher.search_to_depth(&mut board, 3).unwrap();

    assert_eq!(board.hash(), hash);
    assert_eq!(board.ply(), ply);
    assert_eq!(board.side_to_move(), Color::White);
}
