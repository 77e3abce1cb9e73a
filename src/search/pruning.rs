//! Early-exit policies layered on top of alpha-beta.
//!
//! A policy looks at an interior node and may declare it settled, in which
//! case the search returns the node's static evaluation without recursing.
//! This is not sound alpha-beta; [`NoPruning`] turns it off.

use super::constants::DECISIVE_MARGIN;

/// What a policy gets to see of a node.
///
/// Both evaluations are from the root side's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Plies from the root (never 0; the root is not offered to policies)
    pub ply: u32,
    /// Remaining depth in `PLY` units
    pub depth: i32,
    pub root_eval: i32,
    pub static_eval: i32,
}

pub trait PruningPolicy {
    /// Whether recursion below `node` should stop.
    fn settles(&self, node: &NodeSnapshot) -> bool;
}

/// Plain alpha-beta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoPruning;

impl PruningPolicy for NoPruning {
    fn settles(&self, _node: &NodeSnapshot) -> bool {
        false
    }
}

/// Stops once the static evaluation has swung more than `margin` away from
/// the root's, in either direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisiveMargin {
    pub margin: i32,
}

impl Default for DecisiveMargin {
    fn default() -> Self {
        DecisiveMargin {
            margin: DECISIVE_MARGIN,
        }
    }
}

impl PruningPolicy for DecisiveMargin {
    fn settles(&self, node: &NodeSnapshot) -> bool {
        node.ply > 0 && (node.static_eval - node.root_eval).abs() > self.margin
    }
}

impl<T: PruningPolicy + ?Sized> PruningPolicy for &T {
    fn settles(&self, node: &NodeSnapshot) -> bool {
        (**self).settles(node)
    }
}
