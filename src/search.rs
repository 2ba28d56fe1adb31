//! # Joint-State Search
//!
//! Breadth-first search over the product space of all robot positions. Every level
//! of the queue is one time step, so the first node found with every robot on its
//! goal gives a plan of minimum length.
//!
//! Each node carries its own positions, visitation marks and histories. Children are
//! built from the parent without mutating it.
//!
//! Two optional refinements keep the reported plan unchanged:
//!
//! * duplicate suppression drops a node whose positions and marks were already
//!   enqueued. Such nodes have identical futures and the earlier copy is never
//!   later in BFS order.
//! * parallel expansion evaluates the 5^N candidates of one node with rayon and
//!   then pushes the accepted children in enumerator order.

use crate::SetMinMax;
use crate::legality::{LegalOutcome, Rejection, try_apply};
use crate::moves::{MoveCombos, combo_at, combo_count};
use crate::plan::Plan;
use crate::problem::Problem;
use crate::state::{JointPosition, SearchNode, VisitedMarks};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    pub dedup: bool,
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            dedup: true,
            parallel: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Infeasible {
    /// The queue ran dry only because nodes at the time limit were not expanded.
    BudgetExceeded,
    /// Every reachable state was expanded without reaching the goal.
    FrontierExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Plan),
    Infeasible(Infeasible),
}

impl Outcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Outcome::Found(plan) => Some(plan),
            Outcome::Infeasible(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub out_of_bounds: usize,
    pub blocked: usize,
    pub revisit: usize,
    pub collision: usize,
    pub swap: usize,
    pub too_close: usize,
}

impl RejectionCounts {
    fn record(&mut self, r: Rejection) {
        let c = match r {
            Rejection::OutOfBounds { .. } => &mut self.out_of_bounds,
            Rejection::Blocked { .. } => &mut self.blocked,
            Rejection::Revisit { .. } => &mut self.revisit,
            Rejection::Collision { .. } => &mut self.collision,
            Rejection::Swap { .. } => &mut self.swap,
            Rejection::TooClose { .. } => &mut self.too_close,
        };
        *c += 1;
    }

    pub fn total(&self) -> usize {
        self.out_of_bounds
            + self.blocked
            + self.revisit
            + self.collision
            + self.swap
            + self.too_close
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub duplicates: usize,
    pub rejected: RejectionCounts,
    pub max_frontier: usize,
    /// Nodes expanded at each time step.
    pub per_level: Vec<usize>,
}

pub struct Search<'a> {
    problem: &'a Problem,
    options: SearchOptions,
    queue: VecDeque<SearchNode>,
    seen: FxHashSet<(JointPosition, VisitedMarks)>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(problem: &'a Problem, options: SearchOptions) -> Self {
        let root = SearchNode::root(&problem.grid, &problem.starts);
        let mut seen = FxHashSet::default();
        if options.dedup {
            seen.insert((root.positions.clone(), root.marks.clone()));
        }
        let mut queue = VecDeque::new();
        queue.push_back(root);
        Self {
            problem,
            options,
            queue,
            seen,
            stats: SearchStats {
                max_frontier: 1,
                ..Default::default()
            },
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn frontier_len(&self) -> usize {
        self.queue.len()
    }

    /// Removes the oldest node of the frontier.
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.queue.pop_front()
    }

    /// Enqueues every legal child of `node`, in enumerator order.
    pub fn expand(&mut self, node: &SearchNode) {
        let n = self.problem.robot_count;
        self.stats.expanded += 1;
        if self.stats.per_level.len() <= node.time {
            debug!(
                time = node.time,
                frontier = self.queue.len() + 1,
                "entering level"
            );
            self.stats.per_level.resize(node.time + 1, 0);
        }
        self.stats.per_level[node.time] += 1;

        let outcomes: Vec<(Vec<_>, LegalOutcome)> = if self.options.parallel {
            let problem = self.problem;
            (0..combo_count(n))
                .into_par_iter()
                .map(|i| {
                    let combo = combo_at(n, i);
                    let outcome = try_apply(&combo, node, problem);
                    (combo, outcome)
                })
                .collect()
        } else {
            MoveCombos::new(n)
                .map(|combo| {
                    let outcome = try_apply(&combo, node, self.problem);
                    (combo, outcome)
                })
                .collect()
        };

        for (combo, outcome) in outcomes {
            match outcome {
                LegalOutcome::Rejected(r) => self.stats.rejected.record(r),
                LegalOutcome::Accepted(positions) => {
                    let child = node.child(&self.problem.grid, &combo, positions);
                    if self.options.dedup
                        && !self
                            .seen
                            .insert((child.positions.clone(), child.marks.clone()))
                    {
                        self.stats.duplicates += 1;
                        continue;
                    }
                    self.stats.generated += 1;
                    self.queue.push_back(child);
                }
            }
        }
        self.stats.max_frontier.setmax(self.queue.len());
    }

    pub fn run(mut self) -> (Outcome, SearchStats) {
        let limit = self.problem.time_limit;
        let mut truncated = false;
        let outcome = loop {
            let Some(node) = self.pop() else {
                break Outcome::Infeasible(if truncated {
                    Infeasible::BudgetExceeded
                } else {
                    Infeasible::FrontierExhausted
                });
            };
            if node.time > limit {
                break Outcome::Infeasible(Infeasible::BudgetExceeded);
            }
            if node.positions.is_at(&self.problem.goals) {
                break Outcome::Found(Plan::from_history(node.history));
            }
            // Children of a node at the limit could only trip the budget check.
            if node.time < limit {
                self.expand(&node);
            } else {
                truncated = true;
            }
        };
        match &outcome {
            Outcome::Found(plan) => info!(
                steps = plan.steps(),
                expanded = self.stats.expanded,
                "plan found"
            ),
            Outcome::Infeasible(reason) => info!(
                ?reason,
                expanded = self.stats.expanded,
                "no plan within time limit"
            ),
        }
        (outcome, self.stats)
    }
}

/// Searches for a minimum-length plan.
pub fn solve(problem: &Problem, options: SearchOptions) -> (Outcome, SearchStats) {
    Search::new(problem, options).run()
}
