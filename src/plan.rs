//! Per-robot action strings, the answer format of the solver.

use crate::error::MoveError;
use crate::moves::Move;
use itertools::Itertools;
use std::fmt;

/// Printed instead of a plan when none exists within the time limit.
pub const NO_SOLUTION: &str = "NO SOLUTION";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Moves per robot, in chronological order. All rows have the same length.
    pub actions: Vec<Vec<Move>>,
}

impl Plan {
    /// Takes the histories of a goal node; they are recorded forwards, so no reversal.
    pub fn from_history(history: Vec<Vec<Move>>) -> Self {
        debug_assert!(history.iter().map(Vec::len).all_equal());
        Self { actions: history }
    }

    pub fn steps(&self) -> usize {
        self.actions.first().map_or(0, Vec::len)
    }

    pub fn robots(&self) -> usize {
        self.actions.len()
    }

    pub fn lines(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|row| row.iter().map(|m| m.symbol()).collect())
            .collect()
    }

    /// Reads `robots` lines of move symbols. Missing trailing lines count as empty.
    pub fn parse(text: &str, robots: usize) -> Result<Self, MoveError> {
        let lines = text.lines().map(str::trim).collect_vec();
        let used = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        if used > robots {
            return Err(MoveError::RobotCount {
                expected: robots,
                found: used,
            });
        }
        let actions = (0..robots)
            .map(|k| {
                lines
                    .get(k)
                    .copied()
                    .unwrap_or("")
                    .chars()
                    .map(Move::from_symbol)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { actions })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "steps": self.steps(),
            "robots": self.lines(),
        })
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
