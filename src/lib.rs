// # Robogrid: joint motion planning for a few robots on a grid
//
// Finds the earliest time at which every robot can stand on its goal, moving all
// robots simultaneously one cell (or not at all) per step, without collisions,
// without coming closer than a minimum distance and within a step budget.
//
// The core is a breadth-first search over joint positions (`search`), fed by the
// move enumerator (`moves`) and the legality filter (`legality`). The remaining
// modules read problems, check and draw plans, and generate boards.

use anyhow::Context;
use std::io::Read;
use std::path::Path;

/// A trait for conveniently updating a value to its minimum or maximum.
pub trait SetMinMax {
    /// If `v` is less than `self`, updates `self` to `v` and returns `true`.
    /// Otherwise, returns `false`.
    fn setmin(&mut self, v: Self) -> bool;
    /// If `v` is greater than `self`, updates `self` to `v` and returns `true`.
    /// Otherwise, returns `false`.
    fn setmax(&mut self, v: Self) -> bool;
}
impl<T> SetMinMax for T
where
    T: PartialOrd,
{
    fn setmin(&mut self, v: T) -> bool {
        *self > v && {
            *self = v;
            true
        }
    }
    fn setmax(&mut self, v: T) -> bool {
        *self < v && {
            *self = v;
            true
        }
    }
}

/// A macro for convenient initialization of vectors, including nested vectors for multi-dimensional arrays.
///
/// # Examples
///
/// ```
/// use robogrid::mat;
/// // A simple vector
/// let v1 = mat![1, 2, 3];
///
/// // A 2x3 matrix initialized with zeros
/// let m1 = mat![0; 2; 3];
/// assert_eq!(m1, vec![vec![0, 0, 0], vec![0, 0, 0]]);
/// ```
#[macro_export]
macro_rules! mat {
    ($($e:expr),*) => { vec![$($e),*] };
    ($($e:expr,)*) => { vec![$($e),*] };
    ($e:expr; $d:expr) => { vec![$e; $d] };
    ($e:expr; $d:expr $(; $ds:expr)+) => { vec![mat![$e $(; $ds)*]; $d] };
}

/// Reads a whole input, from `path` when given and from stdin otherwise.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

pub mod error;

/// Static board model.
pub mod grid;

/// Atomic moves and the joint move enumerator.
pub mod moves;

/// Input format and run configuration.
pub mod problem;

pub mod state;

pub mod legality;

/// Breadth-first search over joint positions.
pub mod search;

pub mod plan;

/// Independent plan verification.
pub mod judge;

/// Built-in boards with known answers.
pub mod scenarios;

/// SVG rendering of boards and plans.
pub mod svg;

/// Tools for generating boards.
pub mod mapgen {
    /// A module for generating random boards.
    pub mod random;
}

pub mod logging;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setmax_and_setmin() {
        let mut x = 3;
        assert!(x.setmax(5));
        assert!(!x.setmax(4));
        assert!(x.setmin(1));
        assert_eq!(x, 1);
    }

    #[test]
    fn mat_builds_nested_vectors() {
        let m = mat![false; 2; 3];
        assert_eq!(m.len(), 2);
        assert!(m.iter().all(|row| row.len() == 3));
    }
}
