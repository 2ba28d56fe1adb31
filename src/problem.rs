//! # Problem Input
//!
//! The run configuration together with the board, read once from the line-oriented
//! input format:
//!
//! ```text
//! <height> <width>
//! <robotCount>
//! <minDistance>
//! <timeLimit>
//! <height rows of width characters>
//! ```

use crate::error::ParseError;
use crate::grid::{CellKind, Grid, MAX_ROBOTS, Pos};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub grid: Grid,
    pub robot_count: usize,
    /// Minimum Euclidean distance between any two robots at every step.
    pub min_distance: f64,
    /// Largest allowed plan length in steps.
    pub time_limit: usize,
    pub starts: Vec<Pos>,
    pub goals: Vec<Pos>,
}

impl Problem {
    /// Squared separation threshold; distances are compared squared.
    pub fn min_distance_sq(&self) -> f64 {
        self.min_distance * self.min_distance
    }

    /// Builds a problem from an already classified grid, locating the markers.
    ///
    /// Every robot must own exactly one start and one goal.
    pub fn from_grid(
        grid: Grid,
        robot_count: usize,
        min_distance: f64,
        time_limit: usize,
    ) -> Result<Self, ParseError> {
        if !(1..=MAX_ROBOTS).contains(&robot_count) {
            return Err(ParseError::malformed(format!(
                "robot count {} is outside 1..={}",
                robot_count, MAX_ROBOTS
            )));
        }
        if !min_distance.is_finite() || min_distance < 0.0 {
            return Err(ParseError::malformed(format!(
                "invalid minimum distance {}",
                min_distance
            )));
        }
        let mut starts = vec![None; robot_count];
        let mut goals = vec![None; robot_count];
        for (pos, kind) in grid.markers() {
            let (slot, k, what) = match kind {
                CellKind::RobotStart(k) => (&mut starts, k, "start"),
                CellKind::RobotGoal(k) => (&mut goals, k, "goal"),
                _ => unreachable!(),
            };
            if k >= robot_count {
                return Err(ParseError::UnrecognizedRobotId {
                    ch: kind.to_char(),
                    row: pos.row as usize,
                    col: pos.col as usize,
                    robot_count,
                });
            }
            if slot[k].replace(pos).is_some() {
                return Err(ParseError::malformed(format!(
                    "robot {} has more than one {} marker",
                    k, what
                )));
            }
        }
        let collect = |slots: Vec<Option<Pos>>, what: &str| {
            slots
                .into_iter()
                .enumerate()
                .map(|(k, p)| {
                    p.ok_or_else(|| {
                        ParseError::malformed(format!("robot {} has no {} marker", k, what))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };
        let starts = collect(starts, "start")?;
        let goals = collect(goals, "goal")?;
        Ok(Self {
            grid,
            robot_count,
            min_distance,
            time_limit,
            starts,
            goals,
        })
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut header = |what: &str| {
            lines
                .next()
                .ok_or_else(|| ParseError::malformed(format!("missing {}", what)))
        };

        let dims = header("board dimensions")?;
        let mut dims_it = dims.split_whitespace();
        let height: usize = field(dims_it.next(), "height")?;
        let width: usize = field(dims_it.next(), "width")?;
        if dims_it.next().is_some() {
            return Err(ParseError::malformed(format!(
                "unexpected tokens in dimensions line {:?}",
                dims
            )));
        }
        let robot_count: usize = field(Some(header("robot count")?), "robot count")?;
        let min_distance: f64 = field(Some(header("minimum distance")?), "minimum distance")?;
        let time_limit: usize = field(Some(header("time limit")?), "time limit")?;

        let rows: Vec<&str> = lines.collect();
        if !(1..=MAX_ROBOTS).contains(&robot_count) {
            return Err(ParseError::malformed(format!(
                "robot count {} is outside 1..={}",
                robot_count, MAX_ROBOTS
            )));
        }
        let grid = Grid::from_rows(height, width, robot_count, &rows)?;
        Self::from_grid(grid, robot_count, min_distance, time_limit)
    }
}

fn field<T: FromStr>(token: Option<&str>, what: &str) -> Result<T, ParseError> {
    let token = token.ok_or_else(|| ParseError::malformed(format!("missing {}", what)))?;
    token
        .trim()
        .parse()
        .map_err(|_| ParseError::malformed(format!("invalid {}: {:?}", what, token)))
}

impl FromStr for Problem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Problem::parse(s)
    }
}

/// Writes the problem back in the input format.
impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.grid.height(), self.grid.width())?;
        writeln!(f, "{}", self.robot_count)?;
        writeln!(f, "{}", self.min_distance)?;
        writeln!(f, "{}", self.time_limit)?;
        write!(f, "{}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROBOTS: &str = "\
3 4
2
1.5
10
a..B
.##.
b..A
";

    #[test]
    fn parses_header_and_markers() {
        let p = Problem::parse(TWO_ROBOTS).unwrap();
        assert_eq!(p.grid.height(), 3);
        assert_eq!(p.grid.width(), 4);
        assert_eq!(p.robot_count, 2);
        assert_eq!(p.min_distance, 1.5);
        assert_eq!(p.min_distance_sq(), 2.25);
        assert_eq!(p.time_limit, 10);
        assert_eq!(p.starts, vec![Pos::new(0, 0), Pos::new(2, 0)]);
        assert_eq!(p.goals, vec![Pos::new(2, 3), Pos::new(0, 3)]);
        assert!(p.grid.is_blocked(Pos::new(1, 1)));
    }

    #[test]
    fn display_round_trips() {
        let p = Problem::parse(TWO_ROBOTS).unwrap();
        let again = Problem::parse(&p.to_string()).unwrap();
        assert_eq!(p, again);
    }

    #[test]
    fn missing_parameters_are_malformed() {
        for input in ["", "3 3\n", "3 3\n1\n", "3 3\n1\n0\n", "3\n1\n0\n5\n"] {
            let err = Problem::parse(input).unwrap_err();
            assert!(matches!(err, ParseError::MalformedBoard(_)), "{:?}", err);
        }
    }

    #[test]
    fn non_numeric_parameters_are_malformed() {
        let err = Problem::parse("3 x\n1\n0\n5\na..\n...\n..A\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
        let err = Problem::parse("1 2\n1\n0\n-1\naA\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
    }

    #[test]
    fn row_count_and_width_are_checked() {
        let err = Problem::parse("2 3\n1\n0\n5\na..\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
        let err = Problem::parse("2 3\n1\n0\n5\na..\n..A.\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
    }

    #[test]
    fn oversized_dimensions_are_malformed() {
        let err = Problem::parse("1 4000000000000000000\n1\n0\n5\naA\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)), "{:?}", err);
        let err = Problem::parse("2 9223372036854775808\n1\n0\n5\naA\n..\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)), "{:?}", err);
    }

    #[test]
    fn robot_count_is_bounded() {
        let err = Problem::parse("1 2\n0\n0\n5\n..\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
        let err = Problem::parse("1 8\n4\n0\n5\nabcdABCD\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
    }

    #[test]
    fn unknown_robot_letter() {
        let err = Problem::parse("1 4\n1\n0\n5\naAbB\n").unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedRobotId { ch: 'b', .. }));
    }

    #[test]
    fn markers_must_be_unique_and_present() {
        let err = Problem::parse("1 3\n1\n0\n5\naaA\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
        let err = Problem::parse("1 3\n2\n0\n5\naAb\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedBoard(_)));
    }
}
