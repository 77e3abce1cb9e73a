use super::constants::{
    ATTACKED_PENALTY, CAPTURE_EXTENSION, CAPTURE_WEIGHT, CHECK_BONUS, DEFAULT_EVAL_CACHE_MB,
    DEFAULT_LOOKAHEAD_MB, DEFAULT_TT_MB, MAX_QUIESCENCE_PLIES, PROMOTION_WEIGHT,
};
use crate::eval::EvalParams;
use crate::time::TimeParams;
use crate::tt::KeyPolicy;

/// Search configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParams {
    /// Depth refund for captures, in units of `PLY / 4`
    pub capture_extension: i32,
    pub max_quiescence_plies: u32,
    pub tt_mb: usize,
    pub eval_cache_mb: usize,
    pub lookahead_mb: usize,
    pub key_policy: KeyPolicy,
    /// Order moves by last iteration's scores when available
    pub lookahead_ordering: bool,
    pub eval: EvalParams,
    pub ordering: OrderingParams,
    pub time: TimeParams,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            capture_extension: CAPTURE_EXTENSION,
            max_quiescence_plies: MAX_QUIESCENCE_PLIES,
            tt_mb: DEFAULT_TT_MB,
            eval_cache_mb: DEFAULT_EVAL_CACHE_MB,
            lookahead_mb: DEFAULT_LOOKAHEAD_MB,
            key_policy: KeyPolicy::Contextual,
            lookahead_ordering: true,
            eval: EvalParams::default(),
            ordering: OrderingParams::default(),
            time: TimeParams::default(),
        }
    }
}

/// Weights of the static move-ordering key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrderingParams {
    pub capture_weight: i32,
    pub promotion_weight: i32,
    pub check_bonus: i32,
    pub attacked_penalty: i32,
}

impl Default for OrderingParams {
    fn default() -> Self {
        OrderingParams {
            capture_weight: CAPTURE_WEIGHT,
            promotion_weight: PROMOTION_WEIGHT,
            check_bonus: CHECK_BONUS,
            attacked_penalty: ATTACKED_PENALTY,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: SearchParams = serde_json::from_str(
            r#"{ "capture_extension": 0, "key_policy": "PositionOnly", "time": { "panic_time": 250 } }"#,
        )
        .expect("valid config");

        assert_eq!(params.capture_extension, 0);
        assert_eq!(params.key_policy, KeyPolicy::PositionOnly);
        assert_eq!(params.time.panic_time, std::time::Duration::from_millis(250));
        assert_eq!(params.time.branching_factor, TimeParams::default().branching_factor);
        assert_eq!(params.eval, EvalParams::default());
    }
}
