//! Search state: joint positions, per-robot visitation marks and search nodes.

use crate::grid::{Grid, Pos};
use crate::moves::Move;
use itertools::Itertools;
use std::fmt;

/// Positions of all robots at one time step, indexed by robot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointPosition(pub Vec<Pos>);

impl JointPosition {
    pub fn robots(&self) -> usize {
        self.0.len()
    }

    pub fn is_at(&self, goals: &[Pos]) -> bool {
        self.0 == goals
    }
}

impl std::ops::Index<usize> for JointPosition {
    type Output = Pos;

    fn index(&self, robot: usize) -> &Pos {
        &self.0[robot]
    }
}

impl fmt::Display for JointPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(" "))
    }
}

/// Which cells each robot has already occupied on the current branch.
///
/// One bitset per robot over the flat cell index. Nodes own a copy; siblings never
/// see each other's marks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisitedMarks {
    words_per_robot: usize,
    bits: Vec<u64>,
}

impl VisitedMarks {
    pub fn new(robots: usize, cells: usize) -> Self {
        let words_per_robot = cells.div_ceil(64).max(1);
        Self {
            words_per_robot,
            bits: vec![0; robots * words_per_robot],
        }
    }

    fn slot(&self, robot: usize, cell: usize) -> (usize, u64) {
        (robot * self.words_per_robot + cell / 64, 1u64 << (cell % 64))
    }

    pub fn mark(&mut self, robot: usize, cell: usize) {
        let (w, bit) = self.slot(robot, cell);
        self.bits[w] |= bit;
    }

    pub fn is_marked(&self, robot: usize, cell: usize) -> bool {
        let (w, bit) = self.slot(robot, cell);
        self.bits[w] & bit != 0
    }

    /// Number of cells marked for `robot`.
    pub fn count(&self, robot: usize) -> usize {
        let start = robot * self.words_per_robot;
        self.bits[start..start + self.words_per_robot]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }
}

/// One vertex of the search, owning everything its expansion needs.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub positions: JointPosition,
    pub marks: VisitedMarks,
    pub time: usize,
    /// Moves taken so far, per robot, oldest first.
    pub history: Vec<Vec<Move>>,
}

impl SearchNode {
    pub fn root(grid: &Grid, starts: &[Pos]) -> Self {
        let mut marks = VisitedMarks::new(starts.len(), grid.cell_count());
        for (robot, &p) in starts.iter().enumerate() {
            marks.mark(robot, grid.index(p));
        }
        Self {
            positions: JointPosition(starts.to_vec()),
            marks,
            time: 0,
            history: vec![vec![]; starts.len()],
        }
    }

    /// The node reached by applying an accepted joint move.
    pub fn child(&self, grid: &Grid, joint_move: &[Move], positions: JointPosition) -> Self {
        let mut marks = self.marks.clone();
        for (robot, &p) in positions.0.iter().enumerate() {
            marks.mark(robot, grid.index(p));
        }
        let history = self
            .history
            .iter()
            .zip(joint_move)
            .map(|(h, &m)| {
                let mut h = h.clone();
                h.push(m);
                h
            })
            .collect();
        Self {
            positions,
            marks,
            time: self.time + 1,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_are_per_robot() {
        let mut marks = VisitedMarks::new(2, 130);
        marks.mark(0, 3);
        marks.mark(1, 129);
        assert!(marks.is_marked(0, 3));
        assert!(!marks.is_marked(1, 3));
        assert!(marks.is_marked(1, 129));
        assert!(!marks.is_marked(0, 129));
        assert_eq!(marks.count(0), 1);
        assert_eq!(marks.count(1), 1);
    }

    #[test]
    fn child_does_not_touch_parent() {
        let grid = Grid::empty(2, 2);
        let root = SearchNode::root(&grid, &[Pos::new(0, 0)]);
        let child = root.child(&grid, &[Move::Right], JointPosition(vec![Pos::new(0, 1)]));
        assert_eq!(root.time, 0);
        assert_eq!(root.history, vec![Vec::<Move>::new()]);
        assert!(!root.marks.is_marked(0, 1));
        assert_eq!(child.time, 1);
        assert_eq!(child.history, vec![vec![Move::Right]]);
        assert!(child.marks.is_marked(0, 0));
        assert!(child.marks.is_marked(0, 1));
    }
}
