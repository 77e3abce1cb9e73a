use serde::Deserialize;

use chess_search::eval::mate_score;
use chess_search::{Game, Position, SearchParams, Searcher};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    #[serde(rename = "type")]
    kind: String,
    fen: String,
    moves: String,
}

fn first_uci_from_line(moves: &str) -> String {
    let first = moves.split(';').next().unwrap_or(moves);
    first.replace('-', "")
}

fn load() -> ProblemSet {
    let data = include_str!("data/mate_puzzles.json");
    serde_json::from_str(data).expect("invalid mate_puzzles.json")
}

#[test]
fn mate_in_one_suite() {
    let set = load();
    let mut searcher = Searcher::new(SearchParams::default());

    for problem in set.problems.iter().filter(|p| p.kind == "Mate in One") {
        let mut game = Game::from_fen(&problem.fen).expect("valid fen");
        let result = searcher.search_to_depth(&mut game, 2).expect("has moves");

        assert_eq!(
            result.best_move.to_string(),
            first_uci_from_line(&problem.moves),
            "fen: {}",
            problem.fen
        );
        assert_eq!(result.score, mate_score(1), "fen: {}", problem.fen);

        game.play(result.best_move).expect("legal");
        assert!(game.is_checkmate(), "fen: {}", problem.fen);
    }
}

#[test]
fn mate_in_two_suite() {
    let set = load();
    let mut searcher = Searcher::new(SearchParams::default());

    for problem in set.problems.iter().filter(|p| p.kind == "Mate in Two") {
        let mut game = Game::from_fen(&problem.fen).expect("valid fen");
        let result = searcher.search_to_depth(&mut game, 4).expect("has moves");

        // Any forcing first move is accepted; the score proves the mate
        assert_eq!(result.score, mate_score(3), "fen: {}", problem.fen);

        let mut legal = Vec::new();
        game.legal_moves(&mut legal);
        assert!(legal.contains(&result.best_move));
    }
}

#[test]
fn puzzle_lines_are_legal() {
    for problem in load().problems {
        let mut game = Game::from_fen(&problem.fen).expect("valid fen");
        for notation in problem.moves.split(';') {
            game.play_uci(&notation.replace('-', ""))
                .unwrap_or_else(|err| panic!("{}: {err}", problem.fen));
        }
        assert!(game.is_checkmate(), "line does not mate: {}", problem.fen);
    }
}
