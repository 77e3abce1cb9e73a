use cozy_chess::Move;

use super::constants::{DRAW_SCORE, PLY};
use super::pruning::{NodeSnapshot, PruningPolicy};
use super::Searcher;
use crate::position::Position;
use crate::tt::{move_key, score_from_table, score_to_table, CacheKey, NodeFlags};

/// Per-node search context
#[derive(Clone, Copy, Debug)]
pub(super) struct Node {
    /// Remaining depth in `PLY` units
    pub depth: i32,
    pub alpha: i32,
    pub beta: i32,
    /// Plies from the root
    pub ply: u32,
    /// The move into this node captured
    pub capture: bool,
}

impl<R: PruningPolicy> Searcher<R> {
    /// Fail-hard negamax alpha-beta.
    ///
    /// Never probes the cache or consults the pruning policy at the root.
    pub(super) fn alpha_beta<P: Position>(
        &mut self,
        position: &mut P,
        node: Node,
    ) -> (i32, Option<Move>) {
        self.stats.nodes += 1;

        if position.is_draw() {
            return (DRAW_SCORE, None);
        }
        if position.is_checkmate() {
            return (self.evaluator.mated_score(position), None);
        }
        if node.depth <= 0 {
            let score = self.quiesce(position, node.alpha, node.beta, 0, node.ply, node.capture);
            return (score, None);
        }

        let is_root = node.ply == 0;
        let key = CacheKey {
            hash: position.hash(),
            depth: node.depth,
            alpha: node.alpha,
            beta: node.beta,
            ply: node.ply,
            flags: NodeFlags {
                capture: node.capture,
                check: position.in_check(),
                quiescence: false,
            },
        }
        .fingerprint(self.params.key_policy);

        if !is_root {
            if let Some(score) = self.tables.transpositions.probe(key) {
                self.stats.cache_hits += 1;
                return (score_from_table(score, node.ply), None);
            }
        }

        let static_eval = self.static_eval(position);
        if !is_root {
            let from_root = if position.side_to_move() == self.root.side {
                static_eval
            } else {
                -static_eval
            };
            let snapshot = NodeSnapshot {
                ply: node.ply,
                depth: node.depth,
                root_eval: self.root.eval,
                static_eval: from_root,
            };
            if self.policy.settles(&snapshot) {
                self.stats.early_exits += 1;
                return (static_eval, None);
            }
        }

        let mut moves = Vec::with_capacity(64);
        position.legal_moves(&mut moves);
        if moves.is_empty() {
            return (static_eval, None);
        }
        self.order_moves(position, &mut moves);

        let parent = position.hash();
        let mut alpha = node.alpha;
        let mut best_move = None;

        for mv in moves {
            let capture = position.is_capture(mv);
            let mut depth = node.depth - PLY;
            if capture {
                depth += self.params.capture_extension;
            }
            let child = Node {
                depth,
                alpha: -node.beta,
                beta: -alpha,
                ply: node.ply + 1,
                capture,
            };

            let score = {
                let mut scoped = position.play_scoped(mv);
                -self.alpha_beta(&mut *scoped, child).0
            };

            if self.params.lookahead_ordering {
                self.tables
                    .lookahead
                    .store(move_key(parent, mv), score, node.depth);
            }

            if score >= node.beta {
                self.stats.cutoffs += 1;
                self.store(key, node.beta, node);
                return (node.beta, Some(mv));
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
        }

        self.store(key, alpha, node);
        (alpha, best_move)
    }

    fn store(&mut self, key: u64, score: i32, node: Node) {
        self.tables
            .transpositions
            .store(key, score_to_table(score, node.ply), node.depth);
    }
}
