//! Static position evaluation.
//!
//! Scores are centipawns from a chosen perspective. The terms are material,
//! a pawn piece-square table, king tropism for the minor and major pieces,
//! and an endgame phase that adds king coordination and rewards pawn
//! advancement. Drawn and checkmated positions are overridden with terminal
//! scores.

use cozy_chess::{BitBoard, Color, Piece, Square};
use once_cell::sync::Lazy;

use crate::position::Position;

/// Mate score for a side mated at the root; mated later scores less negative.
pub const MATE_SCORE: i32 = 100_000;

/// Scores with absolute value >= this are mate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Material values indexed by `Piece as usize`.
pub const PIECE_VALUES: [i32; Piece::NUM] = [100, 300, 300, 500, 900, 0];

/// Pieces that feel the pull of the kings.
const TROPISM_PIECES: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

/// Pawn bonus from white's side, a1 = 0. Black reads it mirrored by rank.
#[rustfmt::skip]
const PAWN_TABLE: [i32; Square::NUM] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10, -20, -20,  10,  10,   5,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

static DISTANCE: Lazy<[[u8; Square::NUM]; Square::NUM]> = Lazy::new(|| {
    let mut table = [[0u8; Square::NUM]; Square::NUM];
    for (from, row) in table.iter_mut().enumerate() {
        for (to, cell) in row.iter_mut().enumerate() {
            let files = (from % 8).abs_diff(to % 8);
            let ranks = (from / 8).abs_diff(to / 8);
            *cell = (files + ranks) as u8;
        }
    }
    table
});

#[inline]
#[must_use]
pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUES[piece as usize]
}

/// Manhattan distance between two squares.
#[inline]
#[must_use]
pub fn manhattan_distance(a: Square, b: Square) -> i32 {
    i32::from(DISTANCE[a as usize][b as usize])
}

/// Score for delivering mate `distance` plies from the root.
#[inline]
#[must_use]
pub fn mate_score(distance: u32) -> i32 {
    MATE_SCORE - distance.min(MATE_SCORE as u32 - MATE_THRESHOLD as u32) as i32
}

#[inline]
#[must_use]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Plies to mate encoded in a mate score, positive when the side to move
/// delivers it.
#[must_use]
pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        None
    } else if score > 0 {
        Some(MATE_SCORE - score)
    } else {
        Some(-(MATE_SCORE + score))
    }
}

/// Weights of the heuristic terms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalParams {
    /// Penalty per square of distance to the enemy king
    pub tropism_weight: i32,
    /// Endgame penalty per square of distance to the friendly king
    pub coordination_weight: i32,
    /// Non-king material of both sides below which the endgame terms apply
    pub endgame_material: i32,
    /// Endgame bonus per rank a pawn has advanced
    pub pawn_advance_bonus: i32,
    /// Subtracted when the side to move is in check
    pub check_penalty: i32,
}

impl Default for EvalParams {
    fn default() -> Self {
        EvalParams {
            tropism_weight: 2,
            coordination_weight: 1,
            endgame_material: 2800,
            pawn_advance_bonus: 10,
            check_penalty: 20,
        }
    }
}

/// Hand-crafted evaluator.
///
/// Mate scores depend on the distance from the root of the current search,
/// so the searcher moves `root_ply` along with each decision.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    params: EvalParams,
    root_ply: u32,
}

impl Evaluator {
    #[must_use]
    pub fn new(params: EvalParams) -> Self {
        Evaluator {
            params,
            root_ply: 0,
        }
    }

    #[must_use]
    pub fn params(&self) -> &EvalParams {
        &self.params
    }

    /// Measure mate distances from `position`.
    pub fn set_root<P: Position>(&mut self, position: &P) {
        self.root_ply = position.ply();
    }

    /// Full evaluation from `perspective`, including terminal overrides.
    pub fn evaluate<P: Position>(&self, position: &P, perspective: Color) -> i32 {
        if position.is_draw() {
            return 0;
        }
        if position.is_checkmate() {
            let mated = self.mated_score(position);
            return if perspective == position.side_to_move() {
                mated
            } else {
                -mated
            };
        }
        self.heuristic(position, perspective)
    }

    /// Score of a checkmated position for the side to move.
    pub fn mated_score<P: Position>(&self, position: &P) -> i32 {
        -mate_score(position.ply().saturating_sub(self.root_ply))
    }

    /// Evaluation without terminal detection.
    pub fn heuristic<P: Position>(&self, position: &P, perspective: Color) -> i32 {
        let endgame = self.is_endgame(position);
        let mut score = self.side_score(position, perspective, endgame)
            - self.side_score(position, !perspective, endgame);
        if position.in_check() {
            score -= self.params.check_penalty;
        }
        score
    }

    /// Total non-king material of both sides.
    pub fn total_material<P: Position>(position: &P) -> i32 {
        Color::ALL
            .iter()
            .map(|&color| material(position, color))
            .sum()
    }

    pub fn is_endgame<P: Position>(&self, position: &P) -> bool {
        Self::total_material(position) < self.params.endgame_material
    }

    /// `-weight * sum of distances` from each piece in `pieces` to `target`.
    pub fn tropism_bonus(&self, pieces: BitBoard, target: Square, weight: i32) -> i32 {
        -weight
            * pieces
                .into_iter()
                .map(|square| manhattan_distance(square, target))
                .sum::<i32>()
    }

    fn side_score<P: Position>(&self, position: &P, color: Color, endgame: bool) -> i32 {
        let enemy_king = position.king(!color);
        let own_king = position.king(color);

        let mut score = material(position, color);
        for piece in TROPISM_PIECES {
            let pieces = position.pieces(color, piece);
            score += self.tropism_bonus(pieces, enemy_king, self.params.tropism_weight);
            if endgame {
                score += self.tropism_bonus(pieces, own_king, self.params.coordination_weight);
            }
        }

        let pawns = position.pieces(color, Piece::Pawn);
        for square in pawns {
            let relative = relative_index(square, color);
            score += if endgame {
                self.params.pawn_advance_bonus * (relative / 8).saturating_sub(1) as i32
            } else {
                PAWN_TABLE[relative]
            };
        }
        score
    }
}

fn material<P: Position>(position: &P, color: Color) -> i32 {
    Piece::ALL
        .iter()
        .map(|&piece| position.pieces(color, piece).len() as i32 * piece_value(piece))
        .sum()
}

/// Square index seen from `color`'s side of the board.
#[inline]
fn relative_index(square: Square, color: Color) -> usize {
    match color {
        Color::White => square as usize,
        Color::Black => square as usize ^ 56,
    }
}
