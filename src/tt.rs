//! Score caches for the search.
//!
//! One table type backs three caches: transpositions (scores keyed by
//! position and search context), static evaluations (keyed by position) and
//! one-ply lookahead scores used for move ordering (keyed by position and
//! move). Tables have a fixed size chosen at construction and evict by depth.
//!
//! The tables are owned by a single searcher and are not synchronized.

use std::mem;

use cozy_chess::Move;

use crate::eval::{MATE_SCORE, MATE_THRESHOLD};
use crate::position::encode_move;

/// How much of the search context goes into a transposition key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyPolicy {
    /// Position, depth, window, ply and node flags. A stored score is only
    /// ever returned for the exact context that produced it.
    #[default]
    Contextual,
    /// Position hash alone. Faster to hit, but a score computed at another
    /// depth or window is returned as if it were valid for this one.
    PositionOnly,
}

/// Phase flags of a search node that change what its score means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeFlags {
    /// The move into this node captured a piece
    pub capture: bool,
    /// The side to move is in check
    pub check: bool,
    /// The node belongs to the quiescence search
    pub quiescence: bool,
}

impl NodeFlags {
    fn bits(self) -> u64 {
        u64::from(self.capture) | u64::from(self.check) << 1 | u64::from(self.quiescence) << 2
    }
}

/// Composite transposition key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheKey {
    pub hash: u64,
    pub depth: i32,
    pub alpha: i32,
    pub beta: i32,
    /// Plies from the root; mate scores are stored relative to it
    pub ply: u32,
    pub flags: NodeFlags,
}

impl CacheKey {
    /// Fingerprint under `policy`.
    #[must_use]
    pub fn fingerprint(&self, policy: KeyPolicy) -> u64 {
        match policy {
            KeyPolicy::PositionOnly => self.hash,
            KeyPolicy::Contextual => {
                let window = u64::from(self.alpha as u32) | u64::from(self.beta as u32) << 32;
                let mut key = mix(self.hash ^ u64::from(self.depth as u32));
                key = mix(key ^ window);
                mix(key ^ self.flags.bits() ^ u64::from(self.ply) << 8)
            }
        }
    }
}

/// Key for the lookahead score of `mv` played from the position `hash`.
#[must_use]
pub fn move_key(hash: u64, mv: Move) -> u64 {
    mix(hash ^ u64::from(encode_move(mv)) << 48)
}

/// Convert a mate score from root-relative to node-relative before storing.
#[inline]
#[must_use]
pub fn score_to_table(score: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if (MATE_THRESHOLD..=MATE_SCORE).contains(&score) {
        score + ply
    } else if (-MATE_SCORE..=-MATE_THRESHOLD).contains(&score) {
        score - ply
    } else {
        score
    }
}

/// Inverse of [`score_to_table`] for a probe at `ply`.
#[inline]
#[must_use]
pub fn score_from_table(score: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if (MATE_THRESHOLD..=MATE_SCORE + ply).contains(&score) {
        score - ply
    } else if (-MATE_SCORE - ply..=-MATE_THRESHOLD).contains(&score) {
        score + ply
    } else {
        score
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Key 0 marks an empty slot, so real keys are never 0.
#[inline]
fn nonzero(key: u64) -> u64 {
    if key == 0 {
        1
    } else {
        key
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    key: u64,
    score: i32,
    depth: i32,
}

impl Slot {
    fn is_empty(&self) -> bool {
        self.key == 0
    }
}

/// Number of slots per bucket for collision resolution
const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, Debug, Default)]
struct Bucket {
    slots: [Slot; BUCKET_SIZE],
}

/// Fixed-size score cache.
#[derive(Clone, Debug)]
pub struct ScoreTable {
    buckets: Vec<Bucket>,
    mask: usize,
}

impl ScoreTable {
    /// Create a table of roughly `size_mb` megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let bucket_size = mem::size_of::<Bucket>();
        let mut num_buckets = (size_mb * 1024 * 1024) / bucket_size;

        // Power of two for mask indexing
        num_buckets = num_buckets.next_power_of_two() / 2;
        if num_buckets == 0 {
            num_buckets = 1024;
        }

        ScoreTable {
            buckets: vec![Bucket::default(); num_buckets],
            mask: num_buckets - 1,
        }
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    #[must_use]
    pub fn probe(&self, key: u64) -> Option<i32> {
        let key = nonzero(key);
        self.buckets[self.index(key)]
            .slots
            .iter()
            .find(|slot| slot.key == key)
            .map(|slot| slot.score)
    }

    /// Store a score.
    ///
    /// Uses empty or matching slots first, otherwise replaces the entry with
    /// the smallest depth.
    pub fn store(&mut self, key: u64, score: i32, depth: i32) {
        let key = nonzero(key);
        let idx = self.index(key);
        let bucket = &mut self.buckets[idx];

        let target = bucket
            .slots
            .iter()
            .position(|slot| slot.is_empty() || slot.key == key)
            .unwrap_or_else(|| {
                bucket
                    .slots
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, slot)| slot.depth)
                    .map_or(0, |(idx, _)| idx)
            });

        bucket.slots[target] = Slot { key, score, depth };
    }

    /// Returns table fullness in per mille (0-1000).
    #[must_use]
    pub fn fill_per_mille(&self) -> u32 {
        // Sample the first 1000 buckets
        let sample_size = self.buckets.len().min(1000);
        let occupied = self
            .buckets
            .iter()
            .take(sample_size)
            .flat_map(|bucket| bucket.slots.iter())
            .filter(|slot| !slot.is_empty())
            .count();

        let total_slots = sample_size * BUCKET_SIZE;
        ((occupied as u64 * 1000) / total_slots as u64) as u32
    }

    pub fn clear(&mut self) {
        self.buckets.fill(Bucket::default());
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }
}
