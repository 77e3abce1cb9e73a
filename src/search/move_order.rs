//! Move ordering for search.
//!
//! Moves get an integer key and are tried in ascending key order. The static
//! key favors big captures, promotions and checks, and penalizes stepping
//! onto attacked squares. When the previous iteration left a one-ply
//! lookahead score for every candidate, those scores are used instead. The
//! two scales are never mixed in one sort.

use cozy_chess::Move;

use super::params::OrderingParams;
use crate::eval::piece_value;
use crate::position::Position;
use crate::tt::{move_key, ScoreTable};

/// Ranks candidate moves at a node.
#[derive(Clone, Debug, Default)]
pub struct MoveOrderer {
    params: OrderingParams,
}

impl MoveOrderer {
    #[must_use]
    pub fn new(params: OrderingParams) -> Self {
        MoveOrderer { params }
    }

    #[must_use]
    pub fn params(&self) -> &OrderingParams {
        &self.params
    }

    /// Static ordering key of `mv`; lower is tried first.
    ///
    /// The position is identical before and after the call.
    pub fn move_score<P: Position>(&self, position: &mut P, mv: Move) -> i32 {
        let mut score = 0;

        if let Some(captured) = position.captured_piece(mv) {
            score -= self.params.capture_weight * piece_value(captured);
        }
        if let Some(promotion) = mv.promotion {
            score -= self.params.promotion_weight * piece_value(promotion);
        }
        if position.is_attacked(mv.to, !position.side_to_move()) {
            let mover = position.moving_piece(mv).map_or(0, piece_value);
            score += self.params.attacked_penalty + mover;
        }
        if position.play_scoped(mv).in_check() {
            score -= self.params.check_bonus;
        }

        score
    }

    /// Sort `moves` in place, best candidates first.
    ///
    /// Keys come from `lookahead` when it holds a score for every move, from
    /// [`move_score`](Self::move_score) otherwise. Equal keys keep their
    /// generation order.
    pub fn order<P: Position>(
        &self,
        position: &mut P,
        moves: &mut Vec<Move>,
        lookahead: Option<&ScoreTable>,
    ) {
        if moves.len() < 2 {
            return;
        }

        let hash = position.hash();
        let cached: Option<Vec<i32>> = lookahead.and_then(|table| {
            moves
                .iter()
                .map(|&mv| table.probe(move_key(hash, mv)))
                .collect()
        });

        let mut keyed: Vec<(i32, Move)> = match cached {
            Some(scores) => scores
                .into_iter()
                .zip(moves.iter().copied())
                .map(|(score, mv)| (-score, mv))
                .collect(),
            None => moves
                .iter()
                .map(|&mv| (self.move_score(position, mv), mv))
                .collect(),
        };

        keyed.sort_by_key(|&(key, _)| key);
        moves.clear();
        moves.extend(keyed.into_iter().map(|(_, mv)| mv));
    }
}
