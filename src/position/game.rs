use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
    BitBoard, Board, Color, GameStatus, Move, Piece, Square,
};

use super::Position;
use crate::error::PositionError;

/// A board saved before a move, so the move can be taken back.
#[derive(Clone, Debug)]
struct Frame {
    board: Board,
    mv: Move,
}

/// [`Position`] over a `cozy_chess::Board`.
///
/// `cozy-chess` boards are copy-make, so undo pops the board saved by the
/// matching `make_move`. Repeating a position that occurs earlier in this
/// game's history counts as a draw.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: Vec<Frame>,
    base_ply: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::default())
    }

    /// Parses a FEN (standard or Shredder castling notation).
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let board = fen.parse::<Board>().map_err(|_| PositionError::InvalidFen {
            fen: fen.to_string(),
        })?;
        Ok(Self::from_board(board))
    }

    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let stm_offset = u32::from(board.side_to_move() == Color::Black);
        let base_ply = (u32::from(board.fullmove_number()).max(1) - 1) * 2 + stm_offset;
        Game {
            board,
            history: Vec::with_capacity(128),
            base_ply,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays a move after checking it is legal.
    pub fn play(&mut self, mv: Move) -> Result<(), PositionError> {
        if !self.board.is_legal(mv) {
            return Err(PositionError::IllegalMove {
                notation: mv.to_string(),
            });
        }
        self.make_move(mv);
        Ok(())
    }

    /// Plays a move given in UCI notation (`e2e4`, `a7a8q`).
    pub fn play_uci(&mut self, notation: &str) -> Result<Move, PositionError> {
        let mv = self.parse_uci(notation)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Parses UCI notation without playing the move.
    pub fn parse_uci(&self, notation: &str) -> Result<Move, PositionError> {
        notation
            .parse::<Move>()
            .map_err(|_| PositionError::InvalidMove {
                notation: notation.to_string(),
            })
    }

    fn is_repetition(&self) -> bool {
        let hash = self.board.hash();
        let window = usize::from(self.board.halfmove_clock());
        self.history
            .iter()
            .rev()
            .take(window)
            .any(|frame| frame.board.hash() == hash)
    }

    fn is_en_passant(&self, mv: Move) -> bool {
        self.board.piece_on(mv.from) == Some(Piece::Pawn)
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none()
    }
}

impl Position for Game {
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn pieces(&self, color: Color, piece: Piece) -> BitBoard {
        self.board.colored_pieces(color, piece)
    }

    fn king(&self, color: Color) -> Square {
        self.board.king(color)
    }

    fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn is_draw(&self) -> bool {
        self.board.status() == GameStatus::Drawn || self.is_repetition()
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == GameStatus::Won
    }

    fn hash(&self) -> u64 {
        self.board.hash()
    }

    fn ply(&self) -> u32 {
        self.base_ply + self.history.len() as u32
    }

    fn legal_moves(&self, moves: &mut Vec<Move>) {
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
    }

    fn capture_moves(&self, moves: &mut Vec<Move>) {
        let enemy = self.board.colors(!self.board.side_to_move());
        self.board.generate_moves(|piece_moves| {
            for mv in piece_moves {
                if enemy.has(mv.to) || self.is_en_passant(mv) {
                    moves.push(mv);
                }
            }
            false
        });
    }

    fn moving_piece(&self, mv: Move) -> Option<Piece> {
        self.board.piece_on(mv.from)
    }

    fn captured_piece(&self, mv: Move) -> Option<Piece> {
        let enemy = !self.board.side_to_move();
        if self.board.color_on(mv.to) == Some(enemy) {
            self.board.piece_on(mv.to)
        } else if self.is_en_passant(mv) {
            Some(Piece::Pawn)
        } else {
            None
        }
    }

    fn is_attacked(&self, square: Square, by: Color) -> bool {
        let board = &self.board;
        let occupied = board.occupied();
        let diagonal =
            board.colored_pieces(by, Piece::Bishop) | board.colored_pieces(by, Piece::Queen);
        let orthogonal =
            board.colored_pieces(by, Piece::Rook) | board.colored_pieces(by, Piece::Queen);

        !(get_pawn_attacks(square, !by) & board.colored_pieces(by, Piece::Pawn)).is_empty()
            || !(get_knight_moves(square) & board.colored_pieces(by, Piece::Knight)).is_empty()
            || !(get_king_moves(square) & board.colored_pieces(by, Piece::King)).is_empty()
            || !(get_bishop_moves(square, occupied) & diagonal).is_empty()
            || !(get_rook_moves(square, occupied) & orthogonal).is_empty()
    }

    fn make_move(&mut self, mv: Move) {
        debug_assert!(self.board.is_legal(mv), "make_move with illegal move {mv}");
        let saved = self.board.clone();
        self.board.play_unchecked(mv);
        self.history.push(Frame { board: saved, mv });
    }

    fn undo_move(&mut self, mv: Move) {
        let Some(frame) = self.history.pop() else {
            panic!("undo_move({mv}) without a matching make_move");
        };
        assert_eq!(
            frame.mv, mv,
            "undo_move({mv}) does not match the last move made ({})",
            frame.mv
        );
        self.board = frame.board;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(fen: &str) -> Game {
        Game::from_fen(fen).expect("valid fen")
    }

    #[test]
    fn checkmate_and_draw_predicates() {
        let mated = game("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(mated.is_checkmate());
        assert!(mated.in_check());
        assert!(!mated.is_draw());

        let stalemate = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(stalemate.is_draw());
        assert!(!stalemate.is_checkmate());

        let fifty = game("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
        assert!(fifty.is_draw());
    }

    #[test]
    fn repetition_within_history_is_a_draw() {
        let mut g = Game::new();
        for mv in ["g1f3", "g8f6", "f3g1"] {
            g.play_uci(mv).unwrap();
            assert!(!g.is_draw());
        }
        g.play_uci("f6g8").unwrap();
        assert!(g.is_draw());
    }

    #[test]
    fn captures_include_en_passant() {
        let g = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let ep: Move = "e5d6".parse().unwrap();
        assert!(g.is_capture(ep));
        assert_eq!(g.captured_piece(ep), Some(Piece::Pawn));

        let mut captures = Vec::new();
        g.capture_moves(&mut captures);
        assert_eq!(captures, vec![ep]);
    }

    #[test]
    fn castling_is_not_a_capture() {
        let g = game("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let mut moves = Vec::new();
        g.legal_moves(&mut moves);
        let castle = moves
            .iter()
            .copied()
            .find(|mv| mv.from == Square::E1 && mv.to == Square::H1)
            .expect("castling move");
        assert!(!g.is_capture(castle));
    }

    #[test]
    fn attacked_squares() {
        let g = game("4k3/8/4p3/8/8/8/8/4K2R w - - 0 1");
        assert!(g.is_attacked(Square::D5, Color::Black));
        assert!(g.is_attacked(Square::F5, Color::Black));
        assert!(!g.is_attacked(Square::E5, Color::Black));
        assert!(g.is_attacked(Square::H8, Color::White));
        assert!(!g.is_attacked(Square::A1, Color::White));
    }

    #[test]
    fn ply_counts_from_fen() {
        let mut g = game("4k3/8/8/8/8/8/8/4K2R b - - 0 10");
        assert_eq!(g.ply(), 19);
        g.play_uci("e8d7").unwrap();
        assert_eq!(g.ply(), 20);
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let mut g = Game::new();
        assert!(matches!(
            g.play_uci("e2e5"),
            Err(PositionError::IllegalMove { .. })
        ));
        assert!(matches!(
            g.play_uci("zz"),
            Err(PositionError::InvalidMove { .. })
        ));
        assert!(Game::from_fen("not a fen").is_err());
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn mismatched_undo_panics() {
        let mut g = Game::new();
        g.play_uci("e2e4").unwrap();
        g.undo_move("d2d4".parse().unwrap());
    }

    #[test]
    #[should_panic(expected = "without a matching make_move")]
    fn undo_on_fresh_game_panics() {
        let mut g = Game::new();
        g.undo_move("e2e4".parse().unwrap());
    }
}
