//! # Legality Filter
//!
//! Decides whether one joint move, applied to a node, yields an admissible joint
//! state. A joint move is all or nothing: any single failure rejects the whole
//! combination and the node is left as it was.

use crate::grid::Pos;
use crate::moves::Move;
use crate::problem::Problem;
use crate::state::{JointPosition, SearchNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    OutOfBounds { robot: usize },
    Blocked { robot: usize },
    /// The robot already stood on the target earlier in this branch.
    Revisit { robot: usize },
    Collision { a: usize, b: usize },
    /// The two robots would pass through each other.
    Swap { a: usize, b: usize },
    TooClose { a: usize, b: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegalOutcome {
    Accepted(JointPosition),
    Rejected(Rejection),
}

impl LegalOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, LegalOutcome::Accepted(_))
    }
}

/// True when two robots at `p` and `q` are closer than the separation threshold.
///
/// Being exactly at the threshold is allowed.
#[inline]
pub fn violates_separation(p: Pos, q: Pos, min_distance_sq: f64) -> bool {
    (p.dist2(q) as f64) < min_distance_sq
}

/// Applies `joint_move` to a scratch copy of `node`'s positions.
pub fn try_apply(joint_move: &[Move], node: &SearchNode, problem: &Problem) -> LegalOutcome {
    debug_assert_eq!(joint_move.len(), node.positions.robots());
    let grid = &problem.grid;
    let mut next = node.positions.0.clone();

    for (robot, &mv) in joint_move.iter().enumerate() {
        let target = next[robot].shifted(mv);
        if !grid.in_bounds(target) {
            return LegalOutcome::Rejected(Rejection::OutOfBounds { robot });
        }
        if grid.is_blocked(target) {
            return LegalOutcome::Rejected(Rejection::Blocked { robot });
        }
        if mv != Move::Stay && node.marks.is_marked(robot, grid.index(target)) {
            return LegalOutcome::Rejected(Rejection::Revisit { robot });
        }
        next[robot] = target;
    }

    let prev = &node.positions.0;
    let min_sq = problem.min_distance_sq();
    for a in 0..next.len() {
        for b in a + 1..next.len() {
            if next[a] == next[b] {
                return LegalOutcome::Rejected(Rejection::Collision { a, b });
            }
            if next[a] == prev[b] && next[b] == prev[a] {
                return LegalOutcome::Rejected(Rejection::Swap { a, b });
            }
            if violates_separation(next[a], next[b], min_sq) {
                return LegalOutcome::Rejected(Rejection::TooClose { a, b });
            }
        }
    }

    LegalOutcome::Accepted(JointPosition(next))
}
