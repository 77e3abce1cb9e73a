//! Search constants.

// ============================================================================
// DEPTH
// ============================================================================

/// Depth units per ply. Depth is fractional so that captures can be
/// searched deeper than quiet moves.
pub const PLY: i32 = 4;

/// Default depth refund for a capture (half a ply)
pub const CAPTURE_EXTENSION: i32 = PLY / 2;

/// Default plies of quiescence beyond the nominal depth
pub const MAX_QUIESCENCE_PLIES: u32 = 8;

// ============================================================================
// SCORES
// ============================================================================

/// Bound of the root window; larger than any mate score
pub const INFINITY: i32 = 1_000_000;

pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// EARLY EXIT
// ============================================================================

/// Static-evaluation swing against the root that ends recursion
pub const DECISIVE_MARGIN: i32 = 1100;

// ============================================================================
// MOVE ORDERING
// ============================================================================
// Lower keys are tried earlier.

/// Multiplier on the value of the captured piece
pub const CAPTURE_WEIGHT: i32 = 2;

/// Multiplier on the value of the promotion piece
pub const PROMOTION_WEIGHT: i32 = 3;

/// Bonus for moves that give check
pub const CHECK_BONUS: i32 = 100;

/// Penalty for moving onto a square the opponent attacks (plus the mover's value)
pub const ATTACKED_PENALTY: i32 = 40;

// ============================================================================
// CACHES
// ============================================================================

pub const DEFAULT_TT_MB: usize = 8;
pub const DEFAULT_EVAL_CACHE_MB: usize = 2;
pub const DEFAULT_LOOKAHEAD_MB: usize = 2;
