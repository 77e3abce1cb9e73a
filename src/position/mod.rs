//! The rules-engine interface consumed by the search.
//!
//! The searcher never looks at board internals. Everything it needs from the
//! game (move generation, terminal detection, hashing, make/undo) goes
//! through [`Position`]. [`Game`] implements it on top of `cozy-chess`.
//!
//! # Example
//! ```
//! use chess_search::{Game, Position};
//!
//! let mut game = Game::new();
//! let mut moves = Vec::new();
//! game.legal_moves(&mut moves);
//! assert_eq!(moves.len(), 20);
//! ```

mod game;

use std::ops::{Deref, DerefMut};

use cozy_chess::{BitBoard, Color, Move, Piece, Square};

pub use game::Game;

/// Mutable game state as seen by the search.
///
/// Implementations must restore the exact prior state (hash, side to move,
/// ply count) on `undo_move`, and `undo_move` must only ever be called with
/// the most recently made move.
pub trait Position {
    fn side_to_move(&self) -> Color;

    /// Pieces of one type and color.
    fn pieces(&self, color: Color, piece: Piece) -> BitBoard;

    fn king(&self, color: Color) -> Square;

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    fn is_draw(&self) -> bool;

    /// Whether the side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// Position identity hash.
    fn hash(&self) -> u64;

    /// Plies played since the start of the game.
    fn ply(&self) -> u32;

    /// Appends all legal moves to `moves`.
    fn legal_moves(&self, moves: &mut Vec<Move>);

    /// Appends the legal captures to `moves`.
    fn capture_moves(&self, moves: &mut Vec<Move>) {
        let mut all = Vec::with_capacity(64);
        self.legal_moves(&mut all);
        moves.extend(all.into_iter().filter(|mv| self.is_capture(*mv)));
    }

    fn moving_piece(&self, mv: Move) -> Option<Piece>;

    /// Piece removed from the board by `mv`, including en passant victims.
    fn captured_piece(&self, mv: Move) -> Option<Piece>;

    fn is_capture(&self, mv: Move) -> bool {
        self.captured_piece(mv).is_some()
    }

    /// Whether `square` is attacked by any piece of color `by`.
    fn is_attacked(&self, square: Square, by: Color) -> bool;

    fn make_move(&mut self, mv: Move);

    fn undo_move(&mut self, mv: Move);

    /// Applies `mv` and returns a guard that undoes it when dropped.
    fn play_scoped(&mut self, mv: Move) -> MoveScope<'_, Self>
    where
        Self: Sized,
    {
        self.make_move(mv);
        MoveScope { position: self, mv }
    }
}

/// A move applied to a position for the lifetime of the guard.
///
/// Dropping the guard undoes the move, so every exit path of the code that
/// holds it (early returns and cutoffs included) leaves the position as it
/// found it.
pub struct MoveScope<'a, P: Position> {
    position: &'a mut P,
    mv: Move,
}

impl<P: Position> MoveScope<'_, P> {
    #[must_use]
    pub fn played(&self) -> Move {
        self.mv
    }
}

impl<P: Position> Deref for MoveScope<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: Position> DerefMut for MoveScope<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: Position> Drop for MoveScope<'_, P> {
    fn drop(&mut self) {
        self.position.undo_move(self.mv);
    }
}

/// Stable 16-bit move encoding used in cache keys.
///
/// Layout: bits 0-5 from square, bits 6-11 to square, bits 12-14 promotion
/// piece + 1 (0 = none).
#[inline]
#[must_use]
pub fn encode_move(mv: Move) -> u16 {
    let promotion = mv.promotion.map_or(0, |piece| piece as u16 + 1);
    mv.from as u16 | (mv.to as u16) << 6 | promotion << 12
}
