//! Local judge: replays a plan on a problem and checks every rule independently of
//! the search code.

use crate::grid::Pos;
use crate::mat;
use crate::moves::Move;
use crate::plan::{NO_SOLUTION, Plan};
use crate::problem::Problem;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("plan has {found} robots, expected {expected}")]
    RobotCount { expected: usize, found: usize },
    #[error("robot {robot} has {len} moves, robot 0 has {expected}")]
    UnevenLength {
        robot: usize,
        len: usize,
        expected: usize,
    },
    #[error("plan takes {steps} steps, the limit is {limit}")]
    OverBudget { steps: usize, limit: usize },
    #[error("step {step}: robot {robot} leaves the board at {pos}")]
    OutOfBounds { step: usize, robot: usize, pos: Pos },
    #[error("step {step}: robot {robot} enters blocked cell {pos}")]
    Blocked { step: usize, robot: usize, pos: Pos },
    #[error("step {step}: robot {robot} returns to {pos}")]
    Revisit { step: usize, robot: usize, pos: Pos },
    #[error("step {step}: robots {a} and {b} both at {pos}")]
    Collision {
        step: usize,
        a: usize,
        b: usize,
        pos: Pos,
    },
    #[error("step {step}: robots {a} and {b} swap cells")]
    Swap { step: usize, a: usize, b: usize },
    #[error("step {step}: robots {a} and {b} are closer than the minimum distance")]
    TooClose { step: usize, a: usize, b: usize },
    #[error("robot {robot} ends at {pos}, not at its goal")]
    NotAtGoal { robot: usize, pos: Pos },
}

/// Replays `plan` and returns its length if every rule holds.
pub fn verify(problem: &Problem, plan: &Plan) -> Result<usize, Violation> {
    let n = problem.robot_count;
    if plan.robots() != n {
        return Err(Violation::RobotCount {
            expected: n,
            found: plan.robots(),
        });
    }
    let steps = plan.steps();
    for (robot, row) in plan.actions.iter().enumerate() {
        if row.len() != steps {
            return Err(Violation::UnevenLength {
                robot,
                len: row.len(),
                expected: steps,
            });
        }
    }
    if steps > problem.time_limit {
        return Err(Violation::OverBudget {
            steps,
            limit: problem.time_limit,
        });
    }

    let grid = &problem.grid;
    let mut visited = mat![false; n; grid.cell_count()];
    let mut cur = problem.starts.clone();
    for (robot, &p) in cur.iter().enumerate() {
        visited[robot][grid.index(p)] = true;
    }
    for step in 0..steps {
        let prev = cur.clone();
        for robot in 0..n {
            let mv = plan.actions[robot][step];
            let pos = prev[robot].shifted(mv);
            if !grid.in_bounds(pos) {
                return Err(Violation::OutOfBounds { step, robot, pos });
            }
            if grid.is_blocked(pos) {
                return Err(Violation::Blocked { step, robot, pos });
            }
            let cell = grid.index(pos);
            if mv != Move::Stay && visited[robot][cell] {
                return Err(Violation::Revisit { step, robot, pos });
            }
            visited[robot][cell] = true;
            cur[robot] = pos;
        }
        for (a, b) in (0..n).tuple_combinations() {
            if cur[a] == cur[b] {
                return Err(Violation::Collision {
                    step,
                    a,
                    b,
                    pos: cur[a],
                });
            }
            if cur[a] == prev[b] && cur[b] == prev[a] {
                return Err(Violation::Swap { step, a, b });
            }
            if (cur[a].dist2(cur[b]) as f64) < problem.min_distance_sq() {
                return Err(Violation::TooClose { step, a, b });
            }
        }
    }
    for (robot, (&pos, &goal)) in cur.iter().zip(&problem.goals).enumerate() {
        if pos != goal {
            return Err(Violation::NotAtGoal { robot, pos });
        }
    }
    Ok(steps)
}

/// Judges solver output against a problem, writing `!log` lines to stderr.
pub struct LocalJudge {
    problem_name: String,
    problem: Problem,
}

impl LocalJudge {
    pub fn new(problem_name: &str, problem: Problem) -> Self {
        Self {
            problem_name: problem_name.to_string(),
            problem,
        }
    }

    pub fn problem_name(&self) -> &str {
        &self.problem_name
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Returns true for an accepted answer.
    ///
    /// `expected_steps` is `Some(None)` for a problem known to be infeasible and
    /// `Some(Some(n))` when the optimum is known. `NO SOLUTION` is accepted only for a
    /// known-infeasible problem; a plan must be legal and no longer than a known optimum.
    pub fn judge(&self, output: &str, expected_steps: Option<Option<usize>>) -> bool {
        if output.trim() == NO_SOLUTION {
            let ok = matches!(expected_steps, Some(None));
            eprintln!("!log status {}", if ok { "AC" } else { "WA" });
            if !ok {
                eprintln!("!log reason solver reported no solution");
            }
            return ok;
        }
        let plan = match Plan::parse(output, self.problem.robot_count) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("!log status WA");
                eprintln!("!log reason {}", e);
                return false;
            }
        };
        match verify(&self.problem, &plan) {
            Ok(steps) => {
                if let Some(Some(best)) = expected_steps
                    && steps > best
                {
                    eprintln!("!log status WA");
                    eprintln!("!log reason plan of {} steps is not optimal", steps);
                    return false;
                }
                eprintln!("!log status AC");
                eprintln!("!log score {}", steps);
                true
            }
            Err(v) => {
                eprintln!("!log status WA");
                eprintln!("!log reason {}", v);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> Problem {
        Problem::parse("2 3\n2\n1\n6\na.b\nB.A\n").unwrap()
    }

    fn plan(lines: &str) -> Plan {
        Plan::parse(lines, 2).unwrap()
    }

    #[test]
    fn accepts_legal_plan() {
        assert_eq!(verify(&problem(), &plan("RRD\nDLL\n")), Ok(3));
    }

    #[test]
    fn reports_shape_errors() {
        let p = problem();
        assert_eq!(
            verify(&p, &Plan::parse("R\n", 1).unwrap()),
            Err(Violation::RobotCount {
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            verify(&p, &plan("RR\nD\n")),
            Err(Violation::UnevenLength { robot: 1, .. })
        ));
        assert!(matches!(
            verify(&p, &plan("SSSSSSS\nSSSSSSS\n")),
            Err(Violation::OverBudget { steps: 7, limit: 6 })
        ));
    }

    #[test]
    fn reports_movement_errors() {
        let p = problem();
        assert!(matches!(
            verify(&p, &plan("U\nS\n")),
            Err(Violation::OutOfBounds { step: 0, robot: 0, .. })
        ));
        assert!(matches!(
            verify(&p, &plan("RL\nSS\n")),
            Err(Violation::Revisit { step: 1, robot: 0, .. })
        ));
        assert!(matches!(
            verify(&p, &plan("R\nL\n")),
            Err(Violation::Collision { step: 0, .. })
        ));
        assert!(matches!(
            verify(&p, &plan("D\nS\n")),
            Err(Violation::NotAtGoal { robot: 0, .. })
        ));
    }

    #[test]
    fn reports_blocked_swap_and_distance() {
        let p = Problem::parse("2 3\n2\n0\n6\nab#\nBA.\n").unwrap();
        assert!(matches!(
            verify(&p, &Plan::parse("S\nR\n", 2).unwrap()),
            Err(Violation::Blocked { robot: 1, .. })
        ));
        assert!(matches!(
            verify(&p, &Plan::parse("R\nL\n", 2).unwrap()),
            Err(Violation::Swap { step: 0, a: 0, b: 1 })
        ));
        let far = Problem::parse("1 4\n2\n2\n6\naBbA\n").unwrap();
        assert_eq!(
            verify(&far, &Plan::parse("R\nS\n", 2).unwrap()),
            Err(Violation::TooClose { step: 0, a: 0, b: 1 })
        );
    }

    #[test]
    fn verify_agrees_with_search_legality() {
        use crate::legality::{LegalOutcome, try_apply};
        use crate::mapgen::random::{GenParams, generate};
        use crate::state::SearchNode;
        use rand::{Rng, SeedableRng};

        let params = GenParams {
            height: 3,
            width: 3,
            robots: 2,
            min_distance: 1.0,
            time_limit: 6,
            obstacle_ratio: 0.2,
        };
        let mut accepted = 0;
        for seed in 0..60 {
            let p = generate(&params, Some(seed)).unwrap();
            let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed);
            let len = rng.random_range(0..=4);
            let actions = (0..p.robot_count)
                .map(|_| {
                    (0..len)
                        .map(|_| Move::ALL[rng.random_range(0..Move::ALL.len())])
                        .collect_vec()
                })
                .collect_vec();

            let mut node = SearchNode::root(&p.grid, &p.starts);
            let mut legal = true;
            for step in 0..len {
                let joint = actions.iter().map(|row| row[step]).collect_vec();
                match try_apply(&joint, &node, &p) {
                    LegalOutcome::Accepted(next) => node = node.child(&p.grid, &joint, next),
                    LegalOutcome::Rejected(_) => {
                        legal = false;
                        break;
                    }
                }
            }
            let expect_ok = legal && node.positions.is_at(&p.goals);
            let result = verify(&p, &Plan { actions });
            assert_eq!(result.is_ok(), expect_ok, "seed {}: {:?}", seed, result);
            if legal {
                accepted += 1;
            }
        }
        assert!(accepted > 0);
    }

    #[test]
    fn local_judge_verdicts() {
        let judge = LocalJudge::new("small", problem());
        assert_eq!(judge.problem_name(), "small");
        assert!(judge.judge("RRD\nDLL\n", None));
        assert!(judge.judge("RRD\nDLL\n", Some(Some(3))));
        assert!(!judge.judge("RRD\nDLL\n", Some(Some(2))));
        assert!(!judge.judge("RRX\nDLL\n", None));
        assert!(!judge.judge("NO SOLUTION\n", Some(Some(3))));
        assert!(judge.judge("NO SOLUTION\n", Some(None)));
    }
}
