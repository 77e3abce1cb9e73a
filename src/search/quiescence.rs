use super::constants::DRAW_SCORE;
use super::pruning::PruningPolicy;
use super::Searcher;
use crate::position::Position;
use crate::tt::{score_from_table, score_to_table, CacheKey, NodeFlags};

impl<R: PruningPolicy> Searcher<R> {
    /// Quiescence search past the nominal depth.
    ///
    /// Searches captures, or every evasion when in check, for up to
    /// `max_quiescence_plies` further plies. The static evaluation is
    /// returned once no capture improves on it or the limit is reached.
    pub(super) fn quiesce<P: Position>(
        &mut self,
        position: &mut P,
        mut alpha: i32,
        beta: i32,
        qply: u32,
        ply: u32,
        capture: bool,
    ) -> i32 {
        self.stats.qnodes += 1;

        if position.is_draw() {
            return DRAW_SCORE;
        }
        if position.is_checkmate() {
            return self.evaluator.mated_score(position);
        }

        let in_check = position.in_check();
        let stand_pat = self.static_eval(position);
        if qply >= self.params.max_quiescence_plies {
            return stand_pat;
        }

        let key = CacheKey {
            hash: position.hash(),
            depth: -(qply as i32),
            alpha,
            beta,
            ply,
            flags: NodeFlags {
                capture,
                check: in_check,
                quiescence: true,
            },
        }
        .fingerprint(self.params.key_policy);
        if let Some(score) = self.tables.transpositions.probe(key) {
            self.stats.cache_hits += 1;
            return score_from_table(score, ply);
        }

        // Stand pat; in check every evasion has to be looked at
        if !in_check {
            if stand_pat >= beta {
                self.tables
                    .transpositions
                    .store(key, score_to_table(beta, ply), 0);
                return beta;
            }
            alpha = alpha.max(stand_pat);
        }

        let mut moves = Vec::with_capacity(32);
        if in_check {
            position.legal_moves(&mut moves);
        } else {
            position.capture_moves(&mut moves);
        }
        self.order_moves(position, &mut moves);

        for mv in moves {
            let capture = position.is_capture(mv);
            let score = {
                let mut scoped = position.play_scoped(mv);
                -self.quiesce(&mut *scoped, -beta, -alpha, qply + 1, ply + 1, capture)
            };

            if score >= beta {
                self.stats.cutoffs += 1;
                self.tables
                    .transpositions
                    .store(key, score_to_table(beta, ply), 0);
                return beta;
            }
            alpha = alpha.max(score);
        }

        self.tables
            .transpositions
            .store(key, score_to_table(alpha, ply), 0);
        alpha
    }
}
