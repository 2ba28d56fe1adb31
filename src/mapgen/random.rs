//! # Random Board Generation
//!
//! Produces random problem instances: obstacles are scattered over the board and
//! every robot gets a distinct start and goal on the remaining open cells.

use crate::error::ParseError;
use crate::grid::{CellKind, Grid, Pos};
use crate::problem::Problem;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Clone, Debug, PartialEq)]
pub struct GenParams {
    pub height: usize,
    pub width: usize,
    pub robots: usize,
    pub min_distance: f64,
    pub time_limit: usize,
    /// Fraction of cells turned into obstacles, before reserving room for markers.
    pub obstacle_ratio: f64,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            height: 6,
            width: 6,
            robots: 2,
            min_distance: 1.0,
            time_limit: 20,
            obstacle_ratio: 0.2,
        }
    }
}

/// Generates a random problem.
///
/// # Arguments
/// * `params` - Board shape and run parameters.
/// * `seed` - An optional seed for the random number generator for reproducibility.
///
/// Fails if the board has fewer than two cells per robot, or if the parameters
/// would not load as a problem.
pub fn generate(params: &GenParams, seed: Option<u64>) -> Result<Problem, ParseError> {
    let mut rng = match seed {
        Some(s) => rand::rngs::StdRng::seed_from_u64(s),
        None => rand::rngs::StdRng::from_os_rng(),
    };
    let Some(cells) = params.height.checked_mul(params.width) else {
        return Err(ParseError::malformed(format!(
            "a {}x{} board is too large",
            params.height, params.width
        )));
    };
    let markers = params.robots.saturating_mul(2);
    if cells < markers {
        return Err(ParseError::malformed(format!(
            "a {}x{} board cannot hold {} robots",
            params.height, params.width, params.robots
        )));
    }

    // Shuffle all cells once: the first ones become markers, a share of the rest
    // becomes obstacles.
    let mut grid = Grid::empty(params.height, params.width);
    let mut order: Vec<Pos> = (0..cells).map(|i| grid.pos_of(i)).collect();
    order.shuffle(&mut rng);

    let (marked, rest) = order.split_at(markers);
    for (k, pair) in marked.chunks_exact(2).enumerate() {
        grid.set(pair[0], CellKind::RobotStart(k));
        grid.set(pair[1], CellKind::RobotGoal(k));
    }
    let ratio = params.obstacle_ratio.clamp(0.0, 1.0);
    for &p in rest {
        if rng.random_bool(ratio) {
            grid.set(p, CellKind::Blocked);
        }
    }
    Problem::from_grid(grid, params.robots, params.min_distance, params.time_limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_places_all_markers() {
        let params = GenParams {
            height: 5,
            width: 7,
            robots: 3,
            ..Default::default()
        };
        let p = generate(&params, Some(123)).unwrap();
        assert_eq!(p.grid.height(), 5);
        assert_eq!(p.grid.width(), 7);
        assert_eq!(p.robot_count, 3);
        let mut all = p.starts.clone();
        all.extend(&p.goals);
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 6, "markers must be distinct: {:?}", all);
        for &q in &all {
            assert!(!p.grid.is_blocked(q));
        }
    }

    #[test]
    fn generate_is_reproducible() {
        let params = GenParams::default();
        let a = generate(&params, Some(7)).unwrap();
        let b = generate(&params, Some(7)).unwrap();
        assert_eq!(a, b);
        let text = a.to_string();
        assert_eq!(Problem::parse(&text).unwrap(), a);
    }

    #[test]
    fn generate_obstacle_extremes() {
        let mut params = GenParams {
            obstacle_ratio: 0.0,
            ..Default::default()
        };
        let p = generate(&params, Some(1)).unwrap();
        assert_eq!(p.grid.open_cells().count(), 36);
        params.obstacle_ratio = 1.0;
        let p = generate(&params, Some(1)).unwrap();
        assert_eq!(p.grid.open_cells().count(), 4);
    }

    #[test]
    fn generate_rejects_tiny_board() {
        let params = GenParams {
            height: 1,
            width: 3,
            robots: 2,
            ..Default::default()
        };
        assert!(generate(&params, Some(0)).is_err());
    }

    #[test]
    fn generate_rejects_oversized_board() {
        let params = GenParams {
            height: 2,
            width: usize::MAX / 2 + 1,
            ..Default::default()
        };
        assert!(matches!(
            generate(&params, Some(0)),
            Err(ParseError::MalformedBoard(_))
        ));
    }
}
